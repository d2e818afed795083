// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::{ScrapeConfig, ServerSettings};
use crate::fetch::HttpFetcher;
use crate::session::{RunSession, RunStatus};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/scrape/start", data = "<request>")]
pub async fn start_scraping(
    request: Json<ScrapeConfig>,
    session: &State<Arc<RunSession>>,
) -> Result<Json<MessageResponse>, status::Custom<Json<ErrorResponse>>> {
    handlers::start_scraping_handler(request, session).await
}

#[get("/scrape/status")]
pub async fn get_status(session: &State<Arc<RunSession>>) -> Json<RunStatus> {
    handlers::get_status_handler(session).await
}

#[post("/scrape/reset")]
pub async fn reset_status(session: &State<Arc<RunSession>>) -> Json<MessageResponse> {
    handlers::reset_status_handler(session).await
}

#[get("/jobs")]
pub async fn get_results(session: &State<Arc<RunSession>>) -> Json<JobsResponse> {
    handlers::get_results_handler(session).await
}

#[get("/jobs/export")]
pub async fn export_csv(
    session: &State<Arc<RunSession>>,
) -> Result<CsvResponse, status::Custom<Json<ErrorResponse>>> {
    handlers::export_csv_handler(session).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all fields have the expected types".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Routes, catchers and CORS assembled around one shared session.
pub fn build_rocket(session: Arc<RunSession>) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(session)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                start_scraping,
                get_status,
                reset_status,
                get_results,
                export_csv,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(settings: ServerSettings) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(
        settings.fetch_delay,
        settings.fetch_timeout,
    )?);
    let session = RunSession::new(fetcher);

    info!("Starting job aggregator API server on port {}", settings.port);
    info!(
        "Fetch pacing: {:?} between requests",
        settings.fetch_delay
    );

    let figment = rocket::Config::figment().merge(("port", settings.port));

    let _rocket = build_rocket(session).configure(figment).launch().await?;

    Ok(())
}
