pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod session;
pub mod sources;
pub mod types;
pub mod web;

pub use config::{ScrapeConfig, ServerSettings};
pub use extract::TextExtractors;
pub use fetch::{Fetch, HttpFetcher};
pub use filter::JobFilter;
pub use pipeline::Pipeline;
pub use session::{RunSession, RunStatus};
pub use types::JobRecord;
pub use web::start_web_server;
