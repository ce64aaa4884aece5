use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::pipeline::{run_once, RunOutcome, RunSummary};
use crate::state::AppState;

/// POST /api/v1/runs
/// Runs the pipeline once and records the summary as the latest run.
pub async fn handle_trigger_run(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    match run_once(&state.services, state.run_options).await? {
        RunOutcome::NoJobs => Ok(Json(json!({ "status": "no_jobs" }))),
        RunOutcome::Completed(summary) => {
            let body = serde_json::to_value(summary.as_ref())?;
            info!("Run {} stored as latest", summary.run_id);
            *state.latest.write().await = Some(*summary);
            Ok(Json(body))
        }
    }
}

/// GET /api/v1/runs/latest
pub async fn handle_latest_run(State(state): State<AppState>) -> Result<Json<RunSummary>, AppError> {
    state
        .latest
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No completed run yet".to_string()))
}
