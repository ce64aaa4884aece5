use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::fetchers::{
    board_slug, first_text, get_json, log_outcome, BoardRef, FetchError, JobFetcher,
};
use crate::models::job::{JobRecord, JobSource};

/// Ashby job boards, addressed by board URL (`https://jobs.ashbyhq.com/{org}`).
/// Postings are read from `{board_url}/api/jobs`.
pub struct AshbyFetcher {
    client: Client,
}

impl AshbyFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn try_fetch(&self, board: BoardRef<'_>) -> Result<Vec<JobRecord>, FetchError> {
        let board_url = board.identity.trim_end_matches('/');
        let api_url = format!("{board_url}/api/jobs");
        let payload = get_json(&self.client, &api_url).await?;

        // Boards answer either `{ "jobs": [...] }` or a bare list.
        let postings = match payload {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("jobs") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(FetchError::Payload(
                        "ashby `jobs` is not a list".to_string(),
                    ))
                }
            },
            _ => {
                return Err(FetchError::Payload(
                    "ashby board returned neither an object nor a list".to_string(),
                ))
            }
        };

        let slug = board_slug(board_url);
        Ok(postings
            .into_iter()
            .filter_map(|raw| map_posting(raw, board_url, slug, board.company))
            .collect())
    }
}

fn map_posting(raw: Value, board_url: &str, slug: &str, company: &str) -> Option<JobRecord> {
    if !raw.is_object() {
        warn!("Skipping malformed Ashby posting for {company}");
        return None;
    }

    let job_id = first_text(&raw, &["id", "jobId"]);
    let url = match first_text(&raw, &["jobUrl"]) {
        url if url.is_empty() => format!("{board_url}/{job_id}"),
        url => url,
    };

    Some(JobRecord {
        id: format!("ashby_{slug}_{job_id}"),
        title: first_text(&raw, &["title"]),
        company: company.to_string(),
        location: first_text(&raw, &["location", "locationName"]),
        url,
        description: first_text(&raw, &["description", "descriptionHtml"]),
        date_posted: first_text(&raw, &["publishedDate", "publishedAt", "createdAt"]),
        source: Some(JobSource::Ashby),
        raw_data: raw,
        ..Default::default()
    })
}

#[async_trait]
impl JobFetcher for AshbyFetcher {
    fn source(&self) -> JobSource {
        JobSource::Ashby
    }

    async fn fetch(&self, board: BoardRef<'_>) -> Vec<JobRecord> {
        log_outcome(JobSource::Ashby, board.company, self.try_fetch(board).await)
    }
}
