//! One end-to-end pass: fetch, process, report, analyze, publish.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assistant::{AiAssistant, AiInsights};
use crate::errors::AppError;
use crate::fetchers::companies::CompanyEntry;
use crate::fetchers::FetcherManager;
use crate::github::GitHubClient;
use crate::models::job::JobRecord;
use crate::processor::{JobProcessor, ProcessingContext, ProcessingStats};
use crate::reporter::{ReportPaths, Reporter};

/// Everything a run needs, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub companies: Vec<CompanyEntry>,
    pub fetchers: FetcherManager,
    pub processor: JobProcessor,
    pub reporter: Reporter,
    pub assistant: AiAssistant,
    pub github: GitHubClient,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Commit the outputs and refresh the digest issue.
    pub publish: bool,
    pub ai_top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_fetched: usize,
    pub stats: ProcessingStats,
    pub jobs: Vec<JobRecord>,
    pub reports: ReportPaths,
    pub ai_insights: AiInsights,
    pub committed: bool,
    pub issue_updated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Nothing was fetched, or every record was filtered out.
    NoJobs,
    Completed(Box<RunSummary>),
}

pub async fn run_once(services: &Services, options: RunOptions) -> Result<RunOutcome, AppError> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!("Starting job scraping run {}", run_id);

    let fetched = services.fetchers.fetch_all(&services.companies).await;
    let total_fetched = fetched.len();
    if fetched.is_empty() {
        warn!("No jobs fetched. Exiting.");
        return Ok(RunOutcome::NoJobs);
    }

    let processed = services
        .processor
        .process(fetched, ProcessingContext { now: started_at });
    if processed.jobs.is_empty() {
        warn!("No jobs after processing. Exiting.");
        return Ok(RunOutcome::NoJobs);
    }
    let jobs = processed.jobs;

    let reports = services.reporter.generate_reports(&jobs, started_at)?;

    let ai_insights = services
        .assistant
        .analyze_top_jobs(&jobs, options.ai_top_n)
        .await;
    let mut files: Vec<PathBuf> = vec![reports.json.clone(), reports.markdown.clone()];
    if ai_insights.enabled && !ai_insights.analyses.is_empty() {
        files.push(services.reporter.save_ai_insights(&ai_insights)?);
    }

    let (committed, issue_updated) = if options.publish {
        let message = format!("Daily job report - {}", started_at.format("%Y-%m-%d"));
        let committed = services.github.commit_and_push_reports(&files, &message).await;
        if committed {
            info!("Successfully committed and pushed reports");
        } else {
            warn!("Failed to commit and push reports");
        }

        let issue_updated = services
            .github
            .create_daily_digest_issue(&jobs, &reports.markdown, started_at)
            .await;
        if issue_updated {
            info!("Successfully updated GitHub issue");
        } else {
            warn!("Failed to update GitHub issue");
        }
        (committed, issue_updated)
    } else {
        info!("Publishing disabled; skipping commit and digest issue");
        (false, false)
    };

    info!(
        "Run {} complete: {} fetched, {} ranked",
        run_id,
        total_fetched,
        jobs.len()
    );

    Ok(RunOutcome::Completed(Box::new(RunSummary {
        run_id,
        started_at,
        total_fetched,
        stats: processed.stats,
        jobs,
        reports,
        ai_insights,
        committed,
        issue_updated,
    })))
}
