// src/web/handlers.rs
use crate::config::ScrapeConfig;
use crate::export;
use crate::session::{RunSession, RunStatus};
use crate::web::types::*;
use std::sync::Arc;

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

type ErrorStatus = status::Custom<Json<ErrorResponse>>;

fn bad_request_error(error: String, error_code: String, suggestions: Vec<String>) -> ErrorStatus {
    status::Custom(
        Status::BadRequest,
        Json(ErrorResponse::new(error, error_code, suggestions)),
    )
}

pub async fn start_scraping_handler(
    request: Json<ScrapeConfig>,
    session: &State<Arc<RunSession>>,
) -> Result<Json<MessageResponse>, ErrorStatus> {
    let config = request.into_inner();
    info!(
        "Starting scrape run: {} sites, max {} per site",
        config.sites.len(),
        config.max_jobs_per_site
    );

    match session.inner().clone().start(config) {
        Ok(()) => Ok(Json(MessageResponse::success(
            "Scraping started successfully".to_string(),
        ))),
        Err(e) => Err(bad_request_error(
            e.to_string(),
            "SCRAPE_IN_PROGRESS".to_string(),
            vec![
                "Wait for the current run to finish".to_string(),
                "Check progress via the status endpoint".to_string(),
            ],
        )),
    }
}

pub async fn get_status_handler(session: &State<Arc<RunSession>>) -> Json<RunStatus> {
    Json(session.status())
}

pub async fn get_results_handler(session: &State<Arc<RunSession>>) -> Json<JobsResponse> {
    let jobs = session.results();
    Json(JobsResponse {
        success: true,
        count: jobs.len(),
        jobs,
    })
}

pub async fn reset_status_handler(session: &State<Arc<RunSession>>) -> Json<MessageResponse> {
    session.reset();
    Json(MessageResponse::success(
        "Status reset successfully".to_string(),
    ))
}

pub async fn export_csv_handler(
    session: &State<Arc<RunSession>>,
) -> Result<CsvResponse, ErrorStatus> {
    let jobs = session.results();
    if jobs.is_empty() {
        return Err(bad_request_error(
            "No results to export".to_string(),
            "NO_RESULTS".to_string(),
            vec!["Run a scrape first via the start endpoint".to_string()],
        ));
    }

    match export::to_csv_bytes(&jobs) {
        Ok(data) => {
            let filename = format!(
                "startup_tech_jobs_{}.csv",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            );
            Ok(CsvResponse::new(data, filename))
        }
        Err(e) => {
            error!("CSV export failed: {:#}", e);
            Err(status::Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(
                    "Failed to build CSV export".to_string(),
                    "EXPORT_ERROR".to_string(),
                    vec!["Try again in a few moments".to_string()],
                )),
            ))
        }
    }
}

pub async fn health_handler() -> Json<&'static str> {
    Json("OK")
}
