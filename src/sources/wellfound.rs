// src/sources/wellfound.rs
use super::{clean_text, first_text, SourceAdapter};
use crate::config::ScrapeConfig;
use crate::extract::TextExtractors;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use regex::Regex;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const JOBS_URL: &str = "https://wellfound.com/jobs";

const CARD_SELECTOR: &str = "div[class*='job'], div[class*='listing'], div[class*='card'], \
     article[class*='job'], article[class*='listing'], article[class*='card']";

/// Startup-centric board. Markup is unstable, so candidates are picked by
/// class substring and most fields come from the free-text extractors.
pub struct Wellfound {
    fetcher: Arc<dyn Fetch>,
    extractors: Arc<TextExtractors>,
}

impl Wellfound {
    pub fn new(fetcher: Arc<dyn Fetch>, extractors: Arc<TextExtractors>) -> Self {
        Self {
            fetcher,
            extractors,
        }
    }

    fn parse(&self, html: &str, max: usize) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        let Ok(card_selector) = Selector::parse(CARD_SELECTOR) else {
            return Vec::new();
        };
        let Ok(heading_selector) = Selector::parse("h1, h2, h3, a") else {
            return Vec::new();
        };
        let role_heading = Regex::new(r"(?i)engineer|developer|analyst|data|software")
            .expect("invalid role heading pattern");

        let mut jobs = Vec::new();
        for card in document.select(&card_selector) {
            if jobs.len() >= max {
                break;
            }

            let job_text = clean_text(&card.text().collect::<Vec<_>>().join("\n"));
            if job_text.len() < 50 {
                continue;
            }

            let title = card
                .select(&heading_selector)
                .map(|h| clean_text(&h.text().collect::<Vec<_>>().join(" ")))
                .find(|t| role_heading.is_match(t))
                .or_else(|| first_text(&card, &["h1", "h2", "h3"]))
                .unwrap_or_else(|| self.extractors.title(&job_text));

            let company = first_text(&card, &["[class*='company']"])
                .unwrap_or_else(|| self.extractors.company(&job_text));

            if title.is_empty() && company.is_empty() {
                continue;
            }

            let mut record = JobRecord::new("Wellfound");
            record.title = title;
            record.company = company;
            record.job_type = "Remote".to_string();
            record.salary = self.extractors.salary(&job_text);
            record.benefits = self.extractors.benefits(&job_text);
            record.description = job_text;
            record.apply_link = self.extractors.apply_link(&card);
            record.tags = vec!["Startup".to_string(), "Tech".to_string()];
            jobs.push(record);
        }

        jobs
    }
}

#[rocket::async_trait]
impl SourceAdapter for Wellfound {
    fn name(&self) -> &'static str {
        "Wellfound"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(JOBS_URL, HeaderMap::new(), 1)
            .await?;
        Ok(self.parse(&body, config.max_jobs_per_site))
    }
}
