//! Fetch adapters, one per ATS vendor, each mapping the vendor's JSON into
//! `JobRecord`s.
//!
//! `fetch` never fails. Network and parse problems are logged and degrade to
//! an empty list.

pub mod ashby;
pub mod companies;
pub mod greenhouse;
pub mod lever;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::fetchers::ashby::AshbyFetcher;
use crate::fetchers::companies::CompanyEntry;
use crate::fetchers::greenhouse::GreenhouseFetcher;
use crate::fetchers::lever::LeverFetcher;
use crate::models::job::{JobRecord, JobSource};

pub const USER_AGENT: &str = concat!("jobscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Which board to read and which company name to stamp on its postings.
#[derive(Debug, Clone, Copy)]
pub struct BoardRef<'a> {
    /// Greenhouse board token, or the Lever/Ashby board URL.
    pub identity: &'a str,
    pub company: &'a str,
}

#[async_trait]
pub trait JobFetcher: Send + Sync {
    fn source(&self) -> JobSource;

    async fn fetch(&self, board: BoardRef<'_>) -> Vec<JobRecord>;
}

/// Builds the HTTP client shared by every outbound integration.
pub fn build_http_client(timeout: Duration) -> Result<Client, AppError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;
    Ok(client)
}

pub(crate) async fn get_json(client: &Client, url: &str) -> Result<Value, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.json::<Value>().await?)
}

/// Renders an id/date style JSON scalar as text; null becomes empty.
pub(crate) fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// First non-empty string among the given keys.
pub(crate) fn first_text(job: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| value_text(job.get(*k)))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Last path segment of a board URL, ignoring any query string.
pub(crate) fn board_slug(board_url: &str) -> &str {
    let path = board_url.split(['?', '#']).next().unwrap_or(board_url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

pub(crate) fn log_outcome(
    source: JobSource,
    company: &str,
    result: Result<Vec<JobRecord>, FetchError>,
) -> Vec<JobRecord> {
    match result {
        Ok(jobs) => {
            info!("Fetched {} jobs from {} for {}", jobs.len(), source, company);
            jobs
        }
        Err(e) => {
            error!("Error fetching {} jobs for {}: {}", source, company, e);
            Vec::new()
        }
    }
}

/// Dispatches each configured company to the adapter for its ATS.
#[derive(Clone)]
pub struct FetcherManager {
    fetchers: HashMap<JobSource, Arc<dyn JobFetcher>>,
}

impl FetcherManager {
    pub fn new(client: Client) -> Self {
        let greenhouse: Arc<dyn JobFetcher> = Arc::new(GreenhouseFetcher::new(client.clone()));
        let lever: Arc<dyn JobFetcher> = Arc::new(LeverFetcher::new(client.clone()));
        let ashby: Arc<dyn JobFetcher> = Arc::new(AshbyFetcher::new(client));
        Self::with_fetchers(vec![greenhouse, lever, ashby])
    }

    pub fn with_fetchers(fetchers: Vec<Arc<dyn JobFetcher>>) -> Self {
        Self {
            fetchers: fetchers.into_iter().map(|f| (f.source(), f)).collect(),
        }
    }

    /// Fetches every company in order and concatenates the results.
    pub async fn fetch_all(&self, companies: &[CompanyEntry]) -> Vec<JobRecord> {
        let mut all_jobs = Vec::new();

        for company in companies {
            info!("Fetching jobs for {} ({})", company.name, company.ats);

            let Some(source) = company.source() else {
                warn!("Unknown ATS type '{}' for {}", company.ats, company.name);
                continue;
            };
            let Some(identity) = company.identity_for(source) else {
                warn!(
                    "No board identity configured for {} ({}), skipping",
                    company.name, source
                );
                continue;
            };
            let Some(fetcher) = self.fetchers.get(&source) else {
                warn!("No fetcher registered for {}", source);
                continue;
            };

            let jobs = fetcher
                .fetch(BoardRef {
                    identity,
                    company: &company.name,
                })
                .await;
            all_jobs.extend(jobs);
        }

        info!("Total jobs fetched: {}", all_jobs.len());
        all_jobs
    }
}
