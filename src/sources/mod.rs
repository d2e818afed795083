// src/sources/mod.rs
use crate::config::ScrapeConfig;
use crate::extract::TextExtractors;
use crate::fetch::Fetch;
use crate::types::JobRecord;
use anyhow::Result;
use scraper::{ElementRef, Selector};
use std::sync::Arc;

pub mod justremote;
pub mod linkedin;
pub mod remoteok;
pub mod remotive;
pub mod weworkremotely;
pub mod wellfound;

pub use linkedin::{ContactLookup, PageContactLookup, RecruiterInfo};

/// Per-board extraction unit. Given a run configuration, returns a finite
/// sequence of records truncated at the configured maximum. Best-effort: a
/// fetch or parse error yields `Err`, which the orchestrator absorbs.
#[rocket::async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, config: &ScrapeConfig) -> Result<Vec<JobRecord>>;
}

/// Case-insensitive dispatch from a configured source name to its adapter.
/// Unknown names yield `None` and are skipped by the orchestrator.
pub fn adapter_for(
    name: &str,
    fetcher: Arc<dyn Fetch>,
    extractors: Arc<TextExtractors>,
) -> Option<Box<dyn SourceAdapter>> {
    match name.to_lowercase().as_str() {
        "remoteok" => Some(Box::new(remoteok::RemoteOk::new(fetcher, extractors))),
        "wellfound" => Some(Box::new(wellfound::Wellfound::new(fetcher, extractors))),
        "weworkremotely" => Some(Box::new(weworkremotely::WeWorkRemotely::new(fetcher))),
        "remotive" => Some(Box::new(remotive::Remotive::new(fetcher))),
        "justremote" => Some(Box::new(justremote::JustRemote::new(fetcher))),
        "linkedin" => {
            let lookup = Box::new(PageContactLookup::new(fetcher.clone()));
            Some(Box::new(linkedin::LinkedIn::new(fetcher, lookup)))
        }
        _ => None,
    }
}

/// First non-trivial text found by trying the selectors in order.
/// Site markup is assumed unstable, so unparsable selectors are skipped.
pub(crate) fn first_text(element: &ElementRef, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(found) = element.select(&selector).next() {
                let text = clean_text(&found.text().collect::<Vec<_>>().join(" "));
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// First href found by trying the selectors in order.
pub(crate) fn first_href(element: &ElementRef, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for found in element.select(&selector) {
                if let Some(href) = found.value().attr("href") {
                    if !href.is_empty() {
                        return Some(href.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Collapse runs of whitespace and drop empty lines.
pub(crate) fn clean_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::CannedFetch;
    use scraper::Html;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a\n\n  b   c \n"), "a b c");
    }

    #[test]
    fn test_first_text_selector_order() {
        let html = Html::parse_fragment(
            r#"<div><span class="b">second</span><span class="a">first</span></div>"#,
        );
        let root = html.root_element();
        assert_eq!(
            first_text(&root, &["span.a", "span.b"]),
            Some("first".to_string())
        );
        assert_eq!(first_text(&root, &["span.c"]), None);
    }

    #[test]
    fn test_adapter_dispatch_is_case_insensitive() {
        let fetcher = Arc::new(CannedFetch::empty());
        let extractors = Arc::new(TextExtractors::new());
        let adapter = adapter_for("RemoteOK", fetcher.clone(), extractors.clone());
        assert!(adapter.is_some());
        assert_eq!(adapter.unwrap().name(), "RemoteOK");
        assert!(adapter_for("craigslist", fetcher, extractors).is_none());
    }
}
