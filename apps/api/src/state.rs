use std::sync::Arc;

use crate::config::Config;
use crate::workflow::WorkflowOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single orchestrator for this session; owns the workflow state.
    pub orchestrator: Arc<WorkflowOrchestrator>,
    pub config: Config,
}
