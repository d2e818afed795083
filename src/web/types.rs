// src/web/types.rs
use crate::types::JobRecord;
use rocket::http::ContentType;
use rocket::response::{self, Responder};
use rocket::serde::Serialize;
use rocket::{Request, Response};

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobsResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<JobRecord>,
}

/// CSV download with a Content-Disposition attachment filename.
pub struct CsvResponse {
    pub data: Vec<u8>,
    pub filename: String,
}

impl CsvResponse {
    pub fn new(data: Vec<u8>, filename: String) -> Self {
        Self { data, filename }
    }
}

impl<'r> Responder<'r, 'static> for CsvResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::CSV)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}
