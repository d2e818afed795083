// src/sources/weworkremotely.rs
use super::{first_href, first_text, SourceAdapter};
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const LISTING_URL: &str = "https://weworkremotely.com/categories/remote-programming-jobs";
const SITE_ROOT: &str = "https://weworkremotely.com";

/// WeWorkRemotely programming category. Listings carry only title, company
/// and a relative link; the description is just the title text.
pub struct WeWorkRemotely {
    fetcher: Arc<dyn Fetch>,
}

impl WeWorkRemotely {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    fn parse(html: &str, max: usize) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        let Ok(listing_selector) = Selector::parse("li.feature") else {
            return Vec::new();
        };

        let mut jobs = Vec::new();
        for listing in document.select(&listing_selector) {
            if jobs.len() >= max {
                break;
            }

            let title = first_text(&listing, &["span.title"]);
            let company = first_text(&listing, &["span.company"]);

            let (Some(title), Some(company)) = (title, company) else {
                continue;
            };

            let mut record = JobRecord::new("WeWorkRemotely");
            record.description = title.clone();
            record.title = title;
            record.company = company;
            record.job_type = "Remote".to_string();
            record.apply_link = first_href(&listing, &["a"])
                .map(|href| {
                    if href.starts_with("http") {
                        href
                    } else {
                        format!("{}{}", SITE_ROOT, href)
                    }
                })
                .unwrap_or_default();
            record.tags = vec!["Remote".to_string(), "Tech".to_string()];
            jobs.push(record);
        }

        jobs
    }
}

#[rocket::async_trait]
impl SourceAdapter for WeWorkRemotely {
    fn name(&self) -> &'static str {
        "WeWorkRemotely"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(LISTING_URL, HeaderMap::new(), 1)
            .await?;
        Ok(Self::parse(&body, config.max_jobs_per_site))
    }
}
