use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::fetchers::{
    board_slug, first_text, get_json, log_outcome, BoardRef, FetchError, JobFetcher,
};
use crate::models::job::{JobRecord, JobSource};

/// Lever postings API, addressed by the full board URL
/// (`https://api.lever.co/v0/postings/{company}`).
pub struct LeverFetcher {
    client: Client,
}

impl LeverFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn try_fetch(&self, board: BoardRef<'_>) -> Result<Vec<JobRecord>, FetchError> {
        let payload = get_json(&self.client, board.identity).await?;
        let Value::Array(postings) = payload else {
            return Err(FetchError::Payload(
                "lever board did not return a list".to_string(),
            ));
        };

        let slug = board_slug(board.identity);
        Ok(postings
            .into_iter()
            .filter_map(|raw| map_posting(raw, slug, board.company))
            .collect())
    }
}

fn map_posting(raw: Value, slug: &str, company: &str) -> Option<JobRecord> {
    if !raw.is_object() {
        warn!("Skipping malformed Lever posting for {company}");
        return None;
    }

    Some(JobRecord {
        id: format!("lever_{}_{}", slug, first_text(&raw, &["id"])),
        title: first_text(&raw, &["text"]),
        company: company.to_string(),
        location: posting_location(&raw),
        url: first_text(&raw, &["hostedUrl"]),
        description: first_text(&raw, &["description", "descriptionPlain"]),
        date_posted: first_text(&raw, &["createdAt"]),
        source: Some(JobSource::Lever),
        raw_data: raw,
        ..Default::default()
    })
}

/// Lever reports `categories.location` as a string, but older boards send a
/// list of strings or `{name}` objects; `allLocations` is the fallback.
fn posting_location(raw: &Value) -> String {
    let Some(categories) = raw.get("categories") else {
        return String::new();
    };

    let primary = location_names(categories.get("location"));
    if !primary.is_empty() {
        return primary;
    }
    location_names(categories.get("allLocations"))
}

fn location_names(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => item.get("name").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

#[async_trait]
impl JobFetcher for LeverFetcher {
    fn source(&self) -> JobSource {
        JobSource::Lever
    }

    async fn fetch(&self, board: BoardRef<'_>) -> Vec<JobRecord> {
        log_outcome(JobSource::Lever, board.company, self.try_fetch(board).await)
    }
}
