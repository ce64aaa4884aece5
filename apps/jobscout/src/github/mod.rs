//! Publishing: commits the generated files with the local `git` binary and
//! keeps a single open "Daily Roles Digest" issue up to date.
//!
//! Both halves degrade to `false` plus a log line; nothing here aborts a run.

pub mod digest;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::models::job::JobRecord;

pub const GIT_USER_NAME: &str = "github-actions[bot]";
pub const GIT_USER_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";
const ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("`git {step}` failed: {message}")]
    Git { step: String, message: String },

    #[error("GitHub token or repository not configured")]
    NotConfigured,
}

#[derive(Debug, Deserialize)]
struct IssueSummary {
    number: u64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    token: Option<String>,
    repo: Option<String>,
    api_base: String,
    workdir: PathBuf,
}

impl GitHubClient {
    pub fn new(
        http: Client,
        token: Option<String>,
        repo: Option<String>,
        api_base: &str,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http,
            token,
            repo,
            api_base: api_base.trim_end_matches('/').to_string(),
            workdir: workdir.into(),
        }
    }

    pub fn issues_enabled(&self) -> bool {
        self.credentials().is_ok()
    }

    fn credentials(&self) -> Result<(&str, &str), GitHubError> {
        match (self.token.as_deref(), self.repo.as_deref()) {
            (Some(token), Some(repo)) => Ok((token, repo)),
            _ => Err(GitHubError::NotConfigured),
        }
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header("Authorization", format!("token {token}"))
            .header("Accept", ACCEPT)
    }

    // ──────────────────────────────────────────────────────────────────────
    // git
    // ──────────────────────────────────────────────────────────────────────

    /// Stages the files that exist, then commits and pushes. A clean tree
    /// counts as success.
    pub async fn commit_and_push_reports(&self, files: &[PathBuf], message: &str) -> bool {
        match self.try_commit_and_push(files, message).await {
            Ok(()) => true,
            Err(e) => {
                error!("Git operation failed: {}", e);
                false
            }
        }
    }

    async fn try_commit_and_push(&self, files: &[PathBuf], message: &str) -> Result<(), GitHubError> {
        self.git(&["config", "user.name", GIT_USER_NAME]).await?;
        self.git(&["config", "user.email", GIT_USER_EMAIL]).await?;

        for file in files {
            if !self.resolve(file).exists() {
                warn!("Skipping missing file: {}", file.display());
                continue;
            }
            let path = file.to_string_lossy().into_owned();
            self.git(&["add", path.as_str()]).await?;
            info!("Added file: {}", file.display());
        }

        let status = self.git(&["status", "--porcelain"]).await?;
        if status.trim().is_empty() {
            info!("No changes to commit");
            return Ok(());
        }

        self.git(&["commit", "-m", message]).await?;
        info!("Committed changes: {}", message);

        self.git(&["push"]).await?;
        info!("Pushed changes to repository");
        Ok(())
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.workdir.join(file)
        }
    }

    /// Runs one git command in the working directory, returning its stdout.
    async fn git(&self, args: &[&str]) -> Result<String, GitHubError> {
        let step = args.first().copied().unwrap_or_default().to_string();
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| GitHubError::Git {
                step: step.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitHubError::Git {
                step,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    // ──────────────────────────────────────────────────────────────────────
    // Issues
    // ──────────────────────────────────────────────────────────────────────

    /// Number of the first open issue whose title matches exactly.
    pub async fn find_existing_issue(&self, title: &str) -> Result<Option<u64>, GitHubError> {
        let (token, repo) = self.credentials()?;
        let url = format!("{}/repos/{}/issues", self.api_base, repo);

        let response = self
            .authorized(self.http.get(&url), token)
            .query(&[("state", "open"), ("per_page", "100")])
            .send()
            .await?;
        let issues: Vec<IssueSummary> = check(response).await?.json().await?;

        Ok(issues.into_iter().find(|i| i.title == title).map(|i| i.number))
    }

    /// Updates the open issue with this title, or creates it.
    pub async fn create_or_update_issue(&self, title: &str, body: &str, labels: &[&str]) -> bool {
        match self.try_create_or_update_issue(title, body, labels).await {
            Ok(()) => true,
            Err(GitHubError::NotConfigured) => {
                warn!("GitHub token or repo not configured - skipping issue creation");
                false
            }
            Err(e) => {
                error!("Error creating/updating issue: {}", e);
                false
            }
        }
    }

    async fn try_create_or_update_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<(), GitHubError> {
        let (token, repo) = self.credentials()?;

        let mut payload = json!({ "body": body });
        if !labels.is_empty() {
            payload["labels"] = json!(labels);
        }

        match self.find_existing_issue(title).await? {
            Some(number) => {
                let url = format!("{}/repos/{}/issues/{}", self.api_base, repo, number);
                let response = self
                    .authorized(self.http.patch(&url), token)
                    .json(&payload)
                    .send()
                    .await?;
                check(response).await?;
                info!("Updated issue #{}: {}", number, title);
            }
            None => {
                payload["title"] = json!(title);
                let url = format!("{}/repos/{}/issues", self.api_base, repo);
                let response = self
                    .authorized(self.http.post(&url), token)
                    .json(&payload)
                    .send()
                    .await?;
                let created: Value = check(response).await?.json().await?;
                info!("Created issue #{}: {}", created["number"], title);
            }
        }
        Ok(())
    }

    pub async fn create_daily_digest_issue(
        &self,
        jobs: &[JobRecord],
        report_path: &Path,
        now: DateTime<Utc>,
    ) -> bool {
        let body = digest::render_digest(jobs, &report_path.to_string_lossy(), now);
        self.create_or_update_issue(digest::DIGEST_TITLE, &body, &digest::DIGEST_LABELS)
            .await
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GitHubError::Api {
        status: status.as_u16(),
        message,
    })
}
