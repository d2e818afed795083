// src/pipeline.rs
use crate::config::ScrapeConfig;
use crate::extract::TextExtractors;
use crate::fetch::Fetch;
use crate::filter::JobFilter;
use crate::sources::adapter_for;
use crate::types::JobRecord;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fire-and-forget progress callback. The pipeline emits advisory status
/// strings and expects no acknowledgement.
pub type ProgressSink = dyn Fn(&str) + Send + Sync;

/// Iterates the configured sources sequentially, applies the filter to every
/// record and aggregates survivors. One source at a time, one candidate at a
/// time; pacing lives in the transport.
pub struct Pipeline {
    fetcher: Arc<dyn Fetch>,
    extractors: Arc<TextExtractors>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            extractors: Arc::new(TextExtractors::new()),
        }
    }

    /// Runs every configured source to completion and returns the aggregate.
    /// A source-level failure is reported and absorbed; the loop continues
    /// with the next source. There is no partial delivery within a run.
    pub async fn execute(&self, config: &ScrapeConfig, progress: &ProgressSink) -> Vec<JobRecord> {
        let filter = JobFilter::new(config);
        let mut all_jobs = Vec::new();

        for site in &config.sites {
            progress(&format!("Scraping {}...", site));

            let Some(adapter) =
                adapter_for(site, self.fetcher.clone(), self.extractors.clone())
            else {
                warn!("Skipping unknown source: {}", site);
                continue;
            };

            let jobs = match adapter.fetch(config).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    error!("Error scraping {}: {:#}", site, e);
                    progress(&format!("Error scraping {}: {}", site, e));
                    continue;
                }
            };

            progress(&format!(
                "Found {} jobs from {}, filtering...",
                jobs.len(),
                adapter.name()
            ));

            let mut kept = 0usize;
            for mut job in jobs {
                if filter.evaluate(&mut job) {
                    all_jobs.push(job);
                    kept += 1;
                }
            }

            info!("{}: kept {} records", adapter.name(), kept);
            progress(&format!("Added {} jobs from {}", kept, adapter.name()));
        }

        all_jobs
    }
}
