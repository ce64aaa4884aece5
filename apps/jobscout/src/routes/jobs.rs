use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assistant::AssistKind;
use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::processor::profile::KeywordProfile;
use crate::processor::{JobProcessor, ProcessingContext, ProcessingStats};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    /// Keyword profile to use instead of the loaded one, same shape as
    /// `keywords.yaml`.
    #[serde(default)]
    pub profile: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub jobs: Vec<JobRecord>,
    pub stats: ProcessingStats,
}

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub kind: AssistKind,
    #[serde(default)]
    pub user_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub job_id: String,
    pub kind: AssistKind,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub jobs_considered: usize,
    pub insights: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/process
/// Runs the processor over caller-supplied records, with the loaded profile
/// unless the request carries its own.
pub async fn handle_process_jobs(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    if request.jobs.is_empty() {
        return Err(AppError::Validation("jobs must not be empty".to_string()));
    }

    let processed = match request.profile {
        Some(raw) => {
            let profile = KeywordProfile::from_json_value(raw)
                .map_err(|e| AppError::Validation(e.to_string()))?;
            JobProcessor::new(profile).process(request.jobs, ProcessingContext::now())
        }
        None => state
            .services
            .processor
            .process(request.jobs, ProcessingContext::now()),
    };

    Ok(Json(ProcessResponse {
        jobs: processed.jobs,
        stats: processed.stats,
    }))
}

/// POST /api/v1/jobs/:id/assist
/// Per-job assistance for a job from the latest run.
pub async fn handle_assist_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let job = {
        let latest = state.latest.read().await;
        let run = latest
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No completed run yet".to_string()))?;
        run.jobs
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job '{job_id}' not found in latest run")))?
    };

    let assistant = &state.services.assistant;
    if !assistant.enabled() {
        return Err(AppError::Validation(
            "AI assistant is not configured".to_string(),
        ));
    }

    let content = assistant
        .assist(&job, request.kind, &request.user_skills)
        .await
        .ok_or_else(|| AppError::Llm("AI assistant produced no output".to_string()))?;

    Ok(Json(AssistResponse {
        job_id,
        kind: request.kind,
        content,
    }))
}

/// GET /api/v1/insights
pub async fn handle_insights(State(state): State<AppState>) -> Result<Json<InsightsResponse>, AppError> {
    let jobs = state
        .latest
        .read()
        .await
        .as_ref()
        .map(|run| run.jobs.clone())
        .ok_or_else(|| AppError::NotFound("No completed run yet".to_string()))?;

    let assistant = &state.services.assistant;
    if !assistant.enabled() {
        return Err(AppError::Validation(
            "AI assistant is not configured".to_string(),
        ));
    }

    let insights = assistant
        .generate_career_insights(&jobs)
        .await
        .ok_or_else(|| AppError::Llm("AI assistant produced no output".to_string()))?;

    Ok(Json(InsightsResponse {
        jobs_considered: jobs.len().min(crate::assistant::INSIGHTS_SAMPLE),
        insights,
    }))
}
