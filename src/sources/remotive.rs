// src/sources/remotive.rs
use super::{first_href, first_text, SourceAdapter};
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const LISTING_URL: &str = "https://remotive.io/remote-jobs/software-dev";

/// Remotive software-dev category page.
pub struct Remotive {
    fetcher: Arc<dyn Fetch>,
}

impl Remotive {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    fn parse(html: &str, max: usize) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        let Ok(tile_selector) = Selector::parse("div.job-tile, div.job-list-item") else {
            return Vec::new();
        };

        let mut jobs = Vec::new();
        for tile in document.select(&tile_selector) {
            if jobs.len() >= max {
                break;
            }

            let title = first_text(
                &tile,
                &[
                    "h3.job-title", "h3.title", "h2.job-title", "h2.title", "a.job-title",
                    "a.title",
                ],
            );
            let company = first_text(
                &tile,
                &[
                    "span.company",
                    "span.company-name",
                    "div.company",
                    "div.company-name",
                ],
            );

            let (Some(title), Some(company)) = (title, company) else {
                continue;
            };

            let mut record = JobRecord::new("Remotive");
            record.description = title.clone();
            record.title = title;
            record.company = company;
            record.job_type = "Remote".to_string();
            record.apply_link =
                first_href(&tile, &["a.job-title", "a.title"]).unwrap_or_default();
            record.tags = vec!["Remote".to_string(), "Tech".to_string()];
            jobs.push(record);
        }

        jobs
    }
}

#[rocket::async_trait]
impl SourceAdapter for Remotive {
    fn name(&self) -> &'static str {
        "Remotive"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(LISTING_URL, HeaderMap::new(), 1)
            .await?;
        Ok(Self::parse(&body, config.max_jobs_per_site))
    }
}
