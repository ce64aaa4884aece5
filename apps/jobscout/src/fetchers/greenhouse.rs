use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::fetchers::{get_json, log_outcome, value_text, BoardRef, FetchError, JobFetcher};
use crate::models::job::{JobRecord, JobSource};

pub const GREENHOUSE_API_URL: &str = "https://boards-api.greenhouse.io/v1/boards";

#[derive(Debug, Default, Deserialize)]
struct GreenhouseBoard {
    #[serde(default)]
    jobs: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct GreenhouseJob {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    location: Option<GreenhouseLocation>,
    #[serde(default)]
    absolute_url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GreenhouseLocation {
    #[serde(default)]
    name: Option<String>,
}

/// Greenhouse job board API, addressed by board token.
pub struct GreenhouseFetcher {
    client: Client,
    base_url: String,
}

impl GreenhouseFetcher {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, GREENHOUSE_API_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn try_fetch(&self, board: BoardRef<'_>) -> Result<Vec<JobRecord>, FetchError> {
        let url = format!("{}/{}/jobs?content=true", self.base_url, board.identity);
        let payload = get_json(&self.client, &url).await?;
        let parsed: GreenhouseBoard = serde_json::from_value(payload)
            .map_err(|e| FetchError::Payload(format!("greenhouse board: {e}")))?;

        Ok(parsed
            .jobs
            .into_iter()
            .filter_map(|raw| map_job(raw, board))
            .collect())
    }
}

fn map_job(raw: Value, board: BoardRef<'_>) -> Option<JobRecord> {
    let job: GreenhouseJob = match serde_json::from_value(raw.clone()) {
        Ok(job) => job,
        Err(e) => {
            warn!("Skipping malformed Greenhouse posting for {}: {}", board.company, e);
            return None;
        }
    };

    Some(JobRecord {
        id: format!("gh_{}_{}", board.identity, value_text(Some(&job.id))),
        title: job.title.unwrap_or_default(),
        company: board.company.to_string(),
        location: job.location.and_then(|l| l.name).unwrap_or_default(),
        url: job.absolute_url.unwrap_or_default(),
        description: job.content.unwrap_or_default(),
        date_posted: job.updated_at.unwrap_or_default(),
        source: Some(JobSource::Greenhouse),
        raw_data: raw,
        ..Default::default()
    })
}

#[async_trait]
impl JobFetcher for GreenhouseFetcher {
    fn source(&self) -> JobSource {
        JobSource::Greenhouse
    }

    async fn fetch(&self, board: BoardRef<'_>) -> Vec<JobRecord> {
        log_outcome(JobSource::Greenhouse, board.company, self.try_fetch(board).await)
    }
}
