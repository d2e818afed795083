// src/types/job_record.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Canonical normalized job posting.
///
/// Every field defaults to an empty string (or empty vec) so downstream
/// consumers never need existence checks. A record is immutable once past the
/// filter except for `tags`, which the filter replaces on acceptance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub apply_link: String,
    #[serde(default)]
    pub recruiter_name: String,
    #[serde(default)]
    pub recruiter_title: String,
    #[serde(default)]
    pub recruiter_linkedin: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source_site: String,
    #[serde(default)]
    pub scraped_at: String,
}

impl JobRecord {
    /// Fresh record stamped with the capture time, all other fields empty.
    pub fn new(source_site: &str) -> Self {
        Self {
            source_site: source_site.to_string(),
            scraped_at: Utc::now().to_rfc3339(),
            ..Self::default()
        }
    }

    /// Description truncated to 200 characters for tabular output.
    pub fn description_preview(&self) -> String {
        if self.description.chars().count() > 200 {
            let truncated: String = self.description.chars().take(200).collect();
            format!("{}...", truncated)
        } else {
            self.description.clone()
        }
    }

    /// Tags joined for tabular output and for text-level filter checks.
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}
