// src/sources/linkedin.rs
use super::{first_href, first_text, SourceAdapter};
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::warn;

pub const SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/?keywords=software%20engineer&location=Remote&f_TPR=r86400&f_WT=2";
const SITE_ROOT: &str = "https://www.linkedin.com";

/// Recruiter/hiring-contact details pulled from an individual posting page.
#[derive(Debug, Clone, Default)]
pub struct RecruiterInfo {
    pub name: String,
    pub title: String,
    pub profile_url: String,
}

/// Secondary per-candidate lookup. Isolated behind its own capability so the
/// nested fetch (the slowest, most fragile part of the pipeline) can be
/// stubbed or disabled without touching the adapter.
#[rocket::async_trait]
pub trait ContactLookup: Send + Sync {
    async fn lookup(&self, job_url: &str) -> RecruiterInfo;
}

/// Fetches the posting page and scrapes the hiring-team section.
/// Any failure is swallowed and leaves the recruiter fields empty.
pub struct PageContactLookup {
    fetcher: Arc<dyn Fetch>,
}

impl PageContactLookup {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    fn parse(html: &str) -> RecruiterInfo {
        let document = Html::parse_document(html);
        let Ok(section_selector) =
            Selector::parse("div.job-details-hiring-team, div.hiring-team")
        else {
            return RecruiterInfo::default();
        };

        let Some(section) = document.select(&section_selector).next() else {
            return RecruiterInfo::default();
        };

        RecruiterInfo {
            name: first_text(
                &section,
                &["h3.hiring-team__name", "span.hiring-team__name", "h3.name", "span.name"],
            )
            .unwrap_or_default(),
            title: first_text(
                &section,
                &[
                    "p.hiring-team__title",
                    "span.hiring-team__title",
                    "p.title",
                    "span.title",
                ],
            )
            .unwrap_or_default(),
            profile_url: first_href(&section, &["a"]).unwrap_or_default(),
        }
    }
}

#[rocket::async_trait]
impl ContactLookup for PageContactLookup {
    async fn lookup(&self, job_url: &str) -> RecruiterInfo {
        let url = if job_url.starts_with("http") {
            job_url.to_string()
        } else {
            format!("{}{}", SITE_ROOT, job_url)
        };

        match self.fetcher.get_text(&url, browser_headers(), 2).await {
            Ok(body) => Self::parse(&body),
            Err(e) => {
                warn!("Recruiter lookup failed for {}: {}", url, e);
                RecruiterInfo::default()
            }
        }
    }
}

/// Lookup that never leaves the process. Keeps recruiter fields empty.
pub struct DisabledContactLookup;

#[rocket::async_trait]
impl ContactLookup for DisabledContactLookup {
    async fn lookup(&self, _job_url: &str) -> RecruiterInfo {
        RecruiterInfo::default()
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

struct CardStub {
    title: String,
    company: String,
    link: String,
}

/// LinkedIn remote search results. The only adapter that follows each
/// candidate to its posting page for hiring-contact details, which is why it
/// runs with a doubled pacing delay.
pub struct LinkedIn {
    fetcher: Arc<dyn Fetch>,
    contact_lookup: Box<dyn ContactLookup>,
}

impl LinkedIn {
    pub fn new(fetcher: Arc<dyn Fetch>, contact_lookup: Box<dyn ContactLookup>) -> Self {
        Self {
            fetcher,
            contact_lookup,
        }
    }

    // Card extraction is synchronous so the parsed document never crosses an
    // await point (scraper::Html is not Send).
    fn parse_cards(html: &str, max: usize) -> Vec<CardStub> {
        let document = Html::parse_document(html);
        let Ok(card_selector) = Selector::parse("div.job-search-card, div.base-card") else {
            return Vec::new();
        };

        let mut stubs = Vec::new();
        for card in document.select(&card_selector) {
            if stubs.len() >= max {
                break;
            }

            let title = first_text(
                &card,
                &["h3.base-search-card__title", "a.job-search-card__title-link"],
            );
            let company = first_text(
                &card,
                &["h4.base-search-card__subtitle", "a.hidden-nested-link"],
            );

            let (Some(title), Some(company)) = (title, company) else {
                continue;
            };

            stubs.push(CardStub {
                title,
                company,
                link: first_href(&card, &["a"]).unwrap_or_default(),
            });
        }

        stubs
    }
}

#[rocket::async_trait]
impl SourceAdapter for LinkedIn {
    fn name(&self) -> &'static str {
        "LinkedIn"
    }

    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
        let body = self
            .fetcher
            .get_text(SEARCH_URL, browser_headers(), 2)
            .await?;

        let stubs = Self::parse_cards(&body, config.max_jobs_per_site);

        let mut jobs = Vec::with_capacity(stubs.len());
        for stub in stubs {
            let recruiter = if stub.link.is_empty() {
                RecruiterInfo::default()
            } else {
                self.contact_lookup.lookup(&stub.link).await
            };

            let mut record = JobRecord::new("LinkedIn");
            record.description = stub.title.clone();
            record.title = stub.title;
            record.company = stub.company;
            record.job_type = "Remote".to_string();
            record.apply_link = stub.link;
            record.recruiter_name = recruiter.name;
            record.recruiter_title = recruiter.title;
            record.recruiter_linkedin = recruiter.profile_url;
            record.tags = vec![
                "Remote".to_string(),
                "Tech".to_string(),
                "LinkedIn".to_string(),
            ];
            jobs.push(record);
        }

        Ok(jobs)
    }
}
