use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ResumeFile, SearchQuery};
use crate::state::AppState;
use crate::workflow::export::CSV_FILE_NAME;
use crate::workflow::validation::{DEFAULT_JOB_COUNT, MAX_JOB_COUNT};
use crate::workflow::view::WorkflowView;

const MEGABYTE: usize = 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub role: String,
    pub location: String,
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub status: &'static str,
}

/// GET /api/v1/workflow
pub async fn handle_get_workflow(State(state): State<AppState>) -> Json<WorkflowView> {
    Json(state.orchestrator.view())
}

/// POST /api/v1/resume
/// Multipart body with the PDF in field `file`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<WorkflowView>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        file = Some(ResumeFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let file = file.ok_or_else(|| AppError::validation("No résumé file provided"))?;
    state.orchestrator.upload_resume(file).await?;
    Ok(Json(state.orchestrator.view()))
}

/// Oversized bodies get a message naming the limit; anything else is malformed input.
fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let shown = if limit >= MEGABYTE {
            format!("{} MB", limit / MEGABYTE)
        } else {
            format!("{limit} bytes")
        };
        AppError::validation(format!("Résumé file exceeds the {shown} upload limit"))
    } else {
        AppError::validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// POST /api/v1/jobs/search
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<WorkflowView>, AppError> {
    let count = req.count.unwrap_or(DEFAULT_JOB_COUNT as i64);
    let count = u32::try_from(count).map_err(|_| {
        AppError::validation(format!(
            "Number of jobs must be between 1 and {MAX_JOB_COUNT}"
        ))
    })?;

    state
        .orchestrator
        .search(SearchQuery {
            role: req.role,
            location: req.location,
            count,
        })
        .await?;
    Ok(Json(state.orchestrator.view()))
}

/// POST /api/v1/jobs/:index/match
/// Opens the match modal for `jobs[index]` and answers immediately with the
/// pending view; the match itself resolves in the background.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<(StatusCode, Json<WorkflowView>), AppError> {
    state.orchestrator.select_job(index)?;
    Ok((StatusCode::ACCEPTED, Json(state.orchestrator.view())))
}

/// DELETE /api/v1/match
pub async fn handle_close_match(State(state): State<AppState>) -> Json<WorkflowView> {
    state.orchestrator.close_match();
    Json(state.orchestrator.view())
}

/// GET /api/v1/export/csv
pub async fn handle_export_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.orchestrator.download_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}

/// POST /api/v1/export/email
pub async fn handle_email_jobs(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    state.orchestrator.email_jobs(&req.email).await?;
    Ok(Json(EmailResponse { status: "sent" }))
}
