pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::workflow::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/workflow", get(handlers::handle_get_workflow))
        .route(
            "/api/v1/resume",
            post(handlers::handle_upload_resume).layer(upload_limit),
        )
        .route("/api/v1/jobs/search", post(handlers::handle_search_jobs))
        .route("/api/v1/jobs/:index/match", post(handlers::handle_match_job))
        .route("/api/v1/match", delete(handlers::handle_close_match))
        .route("/api/v1/export/csv", get(handlers::handle_export_csv))
        .route("/api/v1/export/email", post(handlers::handle_email_jobs))
        .with_state(state)
}
