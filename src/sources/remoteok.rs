// src/sources/remoteok.rs
use super::SourceAdapter;
use crate::config::ScrapeConfig;
use crate::extract::TextExtractors;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tracing::warn;

pub const API_URL: &str = "https://remoteok.io/api";

/// The one board with a structured JSON listing. Fields map 1:1; salary is
/// derived by scanning the description text.
pub struct RemoteOk {
    fetcher: Arc<dyn Fetch>,
    extractors: Arc<TextExtractors>,
}

impl RemoteOk {
    pub fn new(fetcher: Arc<dyn Fetch>, extractors: Arc<TextExtractors>) -> Self {
        Self {
            fetcher,
            extractors,
        }
    }

    fn map_listings(&self, body: &str, max: usize) -> Result<Vec<JobRecord>> {
        let data: Vec<serde_json::Value> =
            serde_json::from_str(body).context("RemoteOK API returned unexpected JSON shape")?;

        // The first element is API metadata, not a listing.
        let listings = if data.len() > 1 { &data[1..] } else { &[] };

        let mut jobs = Vec::new();
        for listing in listings {
            if jobs.len() >= max {
                break;
            }

            let description = str_field(listing, "description");
            let mut record = JobRecord::new("RemoteOK");
            record.title = str_field(listing, "position");
            record.company = str_field(listing, "company");
            record.job_type = "Remote".to_string();
            record.salary = self.extractors.salary(&description);
            record.description = description;
            record.apply_link = str_field(listing, "url");
            record.tags = listing
                .get("tags")
                .and_then(|v| v.as_array())
                .map(|tags| {
                    tags.iter()
                        .filter_map(|t| t.as_str())
                        .map(|t| t.to_string())
                        .collect()
                })
                .unwrap_or_default();

            jobs.push(record);
        }

        Ok(jobs)
    }
}

fn str_field(value: &serde_json::Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

#[rocket::async_trait]
impl SourceAdapter for RemoteOk {
    fn name(&self) -> &'static str {
        "RemoteOK"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(API_URL, HeaderMap::new(), 1)
            .await?;

        let jobs = self.map_listings(&body, config.max_jobs_per_site)?;
        if jobs.is_empty() {
            warn!("RemoteOK listing was empty");
        }
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::CannedFetch;

    fn payload() -> String {
        serde_json::json!([
            {"legal": "API terms"},
            {
                "position": "Backend Developer",
                "company": "Acme",
                "description": "Remote role. Salary: $85000 with bonus",
                "url": "https://remoteok.io/jobs/1",
                "tags": ["dev", "backend"]
            },
            {
                "position": "Data Engineer",
                "company": "Beta",
                "description": "Remote data work",
                "url": "https://remoteok.io/jobs/2"
            }
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_skips_metadata_and_maps_fields() {
        let fetcher = Arc::new(CannedFetch::empty().with(API_URL, &payload()));
        let adapter = RemoteOk::new(fetcher, Arc::new(TextExtractors::new()));
        let jobs = adapter.fetch(&ScrapeConfig::default()).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Backend Developer");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].job_type, "Remote");
        assert_eq!(jobs[0].salary, "$85000");
        assert_eq!(jobs[0].tags, vec!["dev", "backend"]);
        assert_eq!(jobs[1].salary, "");
        assert_eq!(jobs[1].benefits, "");
    }

    #[tokio::test]
    async fn test_respects_per_site_cap() {
        let fetcher = Arc::new(CannedFetch::empty().with(API_URL, &payload()));
        let adapter = RemoteOk::new(fetcher, Arc::new(TextExtractors::new()));
        let config = ScrapeConfig::default().with_max_jobs_per_site(1);
        let jobs = adapter.fetch(&config).await.unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_an_error() {
        let fetcher = Arc::new(CannedFetch::empty().with(API_URL, "<html>not json</html>"));
        let adapter = RemoteOk::new(fetcher, Arc::new(TextExtractors::new()));
        assert!(adapter.fetch(&ScrapeConfig::default()).await.is_err());
    }
}
