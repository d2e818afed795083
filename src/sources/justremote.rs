// src/sources/justremote.rs
use super::{first_href, first_text, SourceAdapter};
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const LISTING_URL: &str = "https://justremote.co/remote-developer-jobs";

/// JustRemote developer category page.
pub struct JustRemote {
    fetcher: Arc<dyn Fetch>,
}

impl JustRemote {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    fn parse(html: &str, max: usize) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        let Ok(card_selector) = Selector::parse("div.job-card, div.job-item") else {
            return Vec::new();
        };

        let mut jobs = Vec::new();
        for card in document.select(&card_selector) {
            if jobs.len() >= max {
                break;
            }

            // One selector group, so whichever heading or anchor appears
            // first in the card wins.
            let title = first_text(&card, &["h3, h2, a"]);
            let company = first_text(&card, &["span.company"]);

            let (Some(title), Some(company)) = (title, company) else {
                continue;
            };

            let mut record = JobRecord::new("JustRemote");
            record.description = title.clone();
            record.title = title;
            record.company = company;
            record.job_type = "Remote".to_string();
            record.apply_link = first_href(&card, &["a"]).unwrap_or_default();
            record.tags = vec!["Remote".to_string(), "Tech".to_string()];
            jobs.push(record);
        }

        jobs
    }
}

#[rocket::async_trait]
impl SourceAdapter for JustRemote {
    fn name(&self) -> &'static str {
        "JustRemote"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(LISTING_URL, HeaderMap::new(), 1)
            .await?;
        Ok(Self::parse(&body, config.max_jobs_per_site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::CannedFetch;

    const PAGE: &str = r#"
        <div class="job-card">
          <h3>Full Stack Developer</h3>
          <span class="company">Nimbus</span>
          <a href="https://justremote.co/jobs/42">View</a>
        </div>
        <div class="job-item">
          <h2>Untitled card without company</h2>
        </div>
    "#;

    #[tokio::test]
    async fn test_parses_cards() {
        let fetcher = Arc::new(CannedFetch::empty().with(LISTING_URL, PAGE));
        let adapter = JustRemote::new(fetcher);
        let jobs = adapter.fetch(&ScrapeConfig::default()).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Full Stack Developer");
        assert_eq!(jobs[0].company, "Nimbus");
        assert_eq!(jobs[0].apply_link, "https://justremote.co/jobs/42");
        assert_eq!(jobs[0].source_site, "JustRemote");
    }

    #[tokio::test]
    async fn test_title_uses_first_element_in_document_order() {
        const PAGE: &str = r#"
            <div class="job-card">
              <a href="https://justremote.co/jobs/7">Remote React Developer</a>
              <h3>Engineering</h3>
              <span class="company">Vega</span>
            </div>
        "#;
        let fetcher = Arc::new(CannedFetch::empty().with(LISTING_URL, PAGE));
        let adapter = JustRemote::new(fetcher);
        let jobs = adapter.fetch(&ScrapeConfig::default()).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Remote React Developer");
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_to_caller() {
        let fetcher = Arc::new(CannedFetch::empty());
        let adapter = JustRemote::new(fetcher);
        assert!(adapter.fetch(&ScrapeConfig::default()).await.is_err());
    }
}
