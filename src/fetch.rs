// src/fetch.rs
use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Network fetch capability used by every source adapter.
///
/// Implementations apply their own post-request pacing, scaled by `pace`
/// (ordinary boards pass 1, boards needing longer courtesy delays pass 2).
/// Test doubles return canned bodies and skip pacing entirely.
#[rocket::async_trait]
pub trait Fetch: Send + Sync {
    async fn get_text(&self, url: &str, headers: HeaderMap, pace: u32) -> Result<String>;
}

/// reqwest-backed fetcher with a browser user-agent and a fixed
/// delay after every successful request. Crude politeness, not backoff.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(delay: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, delay })
    }
}

#[rocket::async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str, headers: HeaderMap, pace: u32) -> Result<String> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} for {}", response.status(), url);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        tokio::time::sleep(self.delay * pace).await;

        Ok(body)
    }
}
