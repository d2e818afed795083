// src/session.rs
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::pipeline::Pipeline;
use crate::types::JobRecord;
use anyhow::Result;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

/// Lifecycle of one aggregation run. Only transition path:
/// Idle -> Running -> Completed -> Idle (via reset or a new start).
#[derive(Debug, Clone)]
pub enum RunState {
    Idle,
    Running { progress: String },
    Completed { found: usize, error: Option<String> },
}

/// Point-in-time view of the session for the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct RunStatus {
    pub running: bool,
    pub progress: String,
    pub error: Option<String>,
}

/// Supervisory owner of the run flag and the results buffer. The pipeline
/// itself is oblivious to this; it only emits progress strings through a
/// callback. At most one run is active process-wide.
pub struct RunSession {
    fetcher: Arc<dyn Fetch>,
    state: Mutex<RunState>,
    results: Mutex<Vec<JobRecord>>,
}

impl RunSession {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Arc<Self> {
        Arc::new(Self {
            fetcher,
            state: Mutex::new(RunState::Idle),
            results: Mutex::new(Vec::new()),
        })
    }

    /// Starts a run on a background task. Rejects when a run is already
    /// active. The run flag is cleared exactly once whether the pipeline
    /// finishes, errors or panics; results are replaced wholesale.
    pub fn start(self: Arc<Self>, config: ScrapeConfig) -> Result<()> {
        {
            let mut state = self.lock_state();
            if matches!(*state, RunState::Running { .. }) {
                anyhow::bail!("Scraping is already in progress");
            }
            *state = RunState::Running {
                progress: "Starting scraper...".to_string(),
            };
        }
        self.lock_results().clear();

        let session = self.clone();
        let run = tokio::spawn(async move {
            let pipeline = Pipeline::new(session.fetcher.clone());
            let progress_session = session.clone();
            let sink = move |msg: &str| progress_session.set_progress(msg);
            pipeline.execute(&config, &sink).await
        });

        let session = self.clone();
        tokio::spawn(async move {
            match run.await {
                Ok(jobs) => {
                    let found = jobs.len();
                    *session.lock_results() = jobs;
                    info!("Run completed with {} records", found);
                    *session.lock_state() = RunState::Completed { found, error: None };
                }
                Err(e) => {
                    // The run crashed mid-flight; the flag still clears and
                    // the error is captured for inspection.
                    error!("Run aborted: {}", e);
                    *session.lock_state() = RunState::Completed {
                        found: 0,
                        error: Some(format!("Run aborted: {}", e)),
                    };
                }
            }
        });

        Ok(())
    }

    pub fn status(&self) -> RunStatus {
        match &*self.lock_state() {
            RunState::Idle => RunStatus {
                running: false,
                progress: String::new(),
                error: None,
            },
            RunState::Running { progress } => RunStatus {
                running: true,
                progress: progress.clone(),
                error: None,
            },
            RunState::Completed { found, error } => RunStatus {
                running: false,
                progress: match error {
                    Some(_) => "Error occurred during scraping".to_string(),
                    None => format!("Completed! Found {} jobs", found),
                },
                error: error.clone(),
            },
        }
    }

    pub fn results(&self) -> Vec<JobRecord> {
        self.lock_results().clone()
    }

    /// Force the session back to Idle. Results are kept.
    pub fn reset(&self) {
        *self.lock_state() = RunState::Idle;
    }

    fn set_progress(&self, message: &str) {
        let mut state = self.lock_state();
        if let RunState::Running { progress } = &mut *state {
            *progress = message.to_string();
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_results(&self) -> MutexGuard<'_, Vec<JobRecord>> {
        self.results.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::CannedFetch;
    use crate::sources::remoteok;
    use reqwest::header::HeaderMap;
    use std::time::Duration;

    struct SlowFetch;

    #[rocket::async_trait]
    impl Fetch for SlowFetch {
        async fn get_text(&self, _url: &str, _headers: HeaderMap, _pace: u32) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            anyhow::bail!("slow transport failure")
        }
    }

    struct PanickingFetch;

    #[rocket::async_trait]
    impl Fetch for PanickingFetch {
        async fn get_text(&self, _url: &str, _headers: HeaderMap, _pace: u32) -> Result<String> {
            panic!("transport blew up");
        }
    }

    async fn wait_until_done(session: &Arc<RunSession>) -> RunStatus {
        for _ in 0..100 {
            let status = session.status();
            if !status.running {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("run did not complete in time");
    }

    fn one_site_config() -> ScrapeConfig {
        ScrapeConfig::default().with_sites(vec!["remoteok".to_string()])
    }

    #[tokio::test]
    async fn test_concurrent_start_is_rejected() {
        let session = RunSession::new(Arc::new(SlowFetch));
        assert!(session.clone().start(one_site_config()).is_ok());
        assert!(session.clone().start(one_site_config()).is_err());

        let status = wait_until_done(&session).await;
        // All sources failed, but the run itself completed.
        assert!(status.error.is_none());
        assert!(session.clone().start(one_site_config()).is_ok());
        wait_until_done(&session).await;
    }

    #[tokio::test]
    async fn test_successful_run_stores_results() {
        let payload = serde_json::json!([
            {"legal": "terms"},
            {
                "position": "Backend Engineer",
                "company": "Quiet Labs",
                "description": "Remote python role at a startup",
                "url": "https://remoteok.io/jobs/1"
            }
        ])
        .to_string();
        let fetcher = Arc::new(CannedFetch::empty().with(remoteok::API_URL, &payload));

        let session = RunSession::new(fetcher);
        session.clone().start(one_site_config()).unwrap();
        let status = wait_until_done(&session).await;

        assert_eq!(status.progress, "Completed! Found 1 jobs");
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn test_crashed_run_clears_flag_and_captures_error() {
        let session = RunSession::new(Arc::new(PanickingFetch));
        session.clone().start(one_site_config()).unwrap();
        let status = wait_until_done(&session).await;

        assert!(!status.running);
        assert!(status.error.is_some());
        // A fresh start is possible again.
        assert!(session.clone().start(one_site_config()).is_ok());
        wait_until_done(&session).await;
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_and_keeps_results() {
        let session = RunSession::new(Arc::new(SlowFetch));
        session.clone().start(one_site_config()).unwrap();
        wait_until_done(&session).await;

        session.reset();
        let status = session.status();
        assert!(!status.running);
        assert_eq!(status.progress, "");
        assert!(status.error.is_none());
    }
}
