use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The applicant tracking system a posting was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Greenhouse,
    Lever,
    Ashby,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Greenhouse => "greenhouse",
            JobSource::Lever => "lever",
            JobSource::Ashby => "ashby",
        }
    }

    /// Case-insensitive lookup used when reading the companies document.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "greenhouse" => Some(JobSource::Greenhouse),
            "lever" => Some(JobSource::Lever),
            "ashby" => Some(JobSource::Ashby),
            _ => None,
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor-agnostic job posting flowing through the pipeline.
///
/// Every field defaults when missing. `score` and `processed_at` are attached
/// by the processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub url: String,
    /// Free text, may contain markup.
    #[serde(default)]
    pub description: String,
    /// Vendor format, kept as text.
    #[serde(default)]
    pub date_posted: String,
    #[serde(default)]
    pub source: Option<JobSource>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    /// Untouched vendor payload.
    #[serde(default)]
    pub raw_data: Value,
}

impl JobRecord {
    /// Description length in characters, used by the dedup conflict rule.
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }

    pub fn source_label(&self) -> &'static str {
        self.source.map(|s| s.as_str()).unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let job: JobRecord = serde_json::from_value(json!({ "title": "Backend Engineer" })).unwrap();
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.company, "");
        assert_eq!(job.description, "");
        assert_eq!(job.score, 0.0);
        assert!(job.source.is_none());
        assert!(job.processed_at.is_none());
        assert!(job.raw_data.is_null());
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let job = JobRecord {
            source: Some(JobSource::Greenhouse),
            ..Default::default()
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["source"], "greenhouse");
    }

    #[test]
    fn test_source_parse_is_case_insensitive() {
        assert_eq!(JobSource::parse("Lever"), Some(JobSource::Lever));
        assert_eq!(JobSource::parse(" ASHBY "), Some(JobSource::Ashby));
        assert_eq!(JobSource::parse("workday"), None);
    }

    #[test]
    fn test_description_len_counts_characters() {
        let job = JobRecord {
            description: "café".to_string(),
            ..Default::default()
        };
        assert_eq!(job.description_len(), 4);
    }
}
