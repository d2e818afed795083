// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tech keywords used by the filter when the caller does not override them.
pub const DEFAULT_TECH_KEYWORDS: &[&str] = &[
    "software",
    "developer",
    "engineer",
    "programming",
    "frontend",
    "backend",
    "fullstack",
    "devops",
    "data",
    "analyst",
    "python",
    "javascript",
    "react",
    "node",
    "api",
    "database",
    "cloud",
    "aws",
    "docker",
    "kubernetes",
    "ml",
    "machine learning",
    "ai",
    "artificial intelligence",
    "web development",
];

/// Boards scraped when the caller does not override them.
pub const DEFAULT_SITES: &[&str] = &[
    "remoteok",
    "wellfound",
    "weworkremotely",
    "remotive",
    "justremote",
    "linkedin",
];

/// Configuration for one pipeline run. Passed by value through the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,
    #[serde(default = "default_max_jobs")]
    pub max_jobs_per_site: usize,
    #[serde(default = "default_exclude_internships")]
    pub exclude_internships: bool,
    #[serde(default = "default_tech_keywords")]
    pub tech_keywords: Vec<String>,
}

fn default_sites() -> Vec<String> {
    DEFAULT_SITES.iter().map(|s| s.to_string()).collect()
}

fn default_max_jobs() -> usize {
    50
}

fn default_exclude_internships() -> bool {
    true
}

fn default_tech_keywords() -> Vec<String> {
    DEFAULT_TECH_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            max_jobs_per_site: default_max_jobs(),
            exclude_internships: default_exclude_internships(),
            tech_keywords: default_tech_keywords(),
        }
    }
}

impl ScrapeConfig {
    pub fn with_sites(mut self, sites: Vec<String>) -> Self {
        self.sites = sites;
        self
    }

    pub fn with_max_jobs_per_site(mut self, max: usize) -> Self {
        self.max_jobs_per_site = max;
        self
    }

    pub fn with_exclude_internships(mut self, exclude: bool) -> Self {
        self.exclude_internships = exclude;
        self
    }

    pub fn with_tech_keywords(mut self, keywords: Vec<String>) -> Self {
        self.tech_keywords = keywords;
        self
    }
}

/// Server-side settings, environment-driven with documented defaults.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    /// Base pacing delay applied after every successful fetch.
    pub fetch_delay: Duration,
    pub fetch_timeout: Duration,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("JOBREEL_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .context("JOBREEL_PORT must be a valid port number")?,
            Err(_) => 8000,
        };

        let delay_secs = match std::env::var("JOBREEL_FETCH_DELAY_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .context("JOBREEL_FETCH_DELAY_SECS must be a number of seconds")?,
            Err(_) => 2,
        };

        let timeout_secs = match std::env::var("JOBREEL_FETCH_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .context("JOBREEL_FETCH_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => 30,
        };

        Ok(Self {
            port,
            fetch_delay: Duration::from_secs(delay_secs),
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_six_board_baseline() {
        let config = ScrapeConfig::default();
        assert_eq!(config.sites.len(), 6);
        assert_eq!(config.max_jobs_per_site, 50);
        assert!(config.exclude_internships);
        assert!(config.tech_keywords.contains(&"python".to_string()));
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: ScrapeConfig =
            serde_json::from_str(r#"{"max_jobs_per_site": 5}"#).unwrap();
        assert_eq!(config.max_jobs_per_site, 5);
        assert_eq!(config.sites.len(), 6);
        assert!(config.exclude_internships);
    }

    // Only this test may touch JOBREEL_FETCH_TIMEOUT_SECS; tests run in parallel.
    #[test]
    fn test_server_settings_timeout_from_env() {
        std::env::remove_var("JOBREEL_FETCH_TIMEOUT_SECS");
        let settings = ServerSettings::from_env().unwrap();
        assert_eq!(settings.fetch_timeout, Duration::from_secs(30));

        std::env::set_var("JOBREEL_FETCH_TIMEOUT_SECS", "5");
        let settings = ServerSettings::from_env().unwrap();
        assert_eq!(settings.fetch_timeout, Duration::from_secs(5));

        std::env::set_var("JOBREEL_FETCH_TIMEOUT_SECS", "soon");
        assert!(ServerSettings::from_env().is_err());
        std::env::remove_var("JOBREEL_FETCH_TIMEOUT_SECS");
    }

    #[test]
    fn test_builder_setters() {
        let config = ScrapeConfig::default()
            .with_sites(vec!["remoteok".to_string()])
            .with_max_jobs_per_site(10)
            .with_exclude_internships(false);
        assert_eq!(config.sites, vec!["remoteok"]);
        assert_eq!(config.max_jobs_per_site, 10);
        assert!(!config.exclude_internships);
    }
}
