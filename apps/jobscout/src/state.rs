use std::sync::Arc;

use tokio::sync::RwLock;

use crate::pipeline::{RunOptions, RunSummary, Services};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub run_options: RunOptions,
    /// Summary of the most recent completed run, if any.
    pub latest: Arc<RwLock<Option<RunSummary>>>,
}

impl AppState {
    pub fn new(services: Services, run_options: RunOptions) -> Self {
        Self {
            services,
            run_options,
            latest: Arc::new(RwLock::new(None)),
        }
    }
}
