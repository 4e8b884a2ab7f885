//! Precondition checks run before any remote call.

use crate::errors::AppError;
use crate::models::{ResumeFile, SearchQuery, PDF_MEDIA_TYPE};

pub const DEFAULT_JOB_COUNT: u32 = 5;
pub const MAX_JOB_COUNT: u32 = 10;

/// Content types browsers send when they cannot tell; the file name decides then.
const GENERIC_MEDIA_TYPES: &[&str] = &["application/octet-stream", "binary/octet-stream"];

/// Checks that a résumé file is present and declared as PDF.
/// The bytes themselves are never inspected; parsing is the upload service's job.
pub fn validate_resume_file(file: &ResumeFile) -> Result<(), AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::validation("No résumé file provided"));
    }

    let declared = file
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
    let named_pdf = file.file_name.to_ascii_lowercase().ends_with(".pdf");

    let is_pdf = match declared.as_deref() {
        Some(PDF_MEDIA_TYPE) => true,
        Some(ct) if GENERIC_MEDIA_TYPES.contains(&ct) => named_pdf,
        Some(_) => false,
        None => named_pdf,
    };

    if !is_pdf {
        return Err(AppError::validation(format!(
            "Only PDF résumés are accepted (got '{}')",
            file.file_name
        )));
    }
    Ok(())
}

pub fn validate_search(query: &SearchQuery) -> Result<(), AppError> {
    if query.role.trim().is_empty() {
        return Err(AppError::validation("Role must not be empty"));
    }
    if query.location.trim().is_empty() {
        return Err(AppError::validation("Location must not be empty"));
    }
    if !(1..=MAX_JOB_COUNT).contains(&query.count) {
        return Err(AppError::validation(format!(
            "Number of jobs must be between 1 and {MAX_JOB_COUNT}"
        )));
    }
    Ok(())
}

/// Minimal plausibility check: non-empty and contains '@'.
pub fn validate_email(address: &str) -> Result<(), AppError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::validation("Email address must not be empty"));
    }
    if !address.contains('@') {
        return Err(AppError::validation(format!(
            "'{address}' is not a valid email address"
        )));
    }
    Ok(())
}
