pub mod health;
pub mod jobs;
pub mod runs;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pipeline runs
        .route("/api/v1/runs", post(runs::handle_trigger_run))
        .route("/api/v1/runs/latest", get(runs::handle_latest_run))
        // Jobs and assistance
        .route("/api/v1/jobs/process", post(jobs::handle_process_jobs))
        .route("/api/v1/jobs/:id/assist", post(jobs::handle_assist_job))
        .route("/api/v1/insights", get(jobs::handle_insights))
        .with_state(state)
}
