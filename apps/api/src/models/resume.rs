use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed résumé as returned by the upload service.
///
/// The record is opaque to the orchestrator: it is stored and displayed, never
/// interpreted, apart from the candidate name used in logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resume(pub Value);

impl Resume {
    pub fn candidate_name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

/// A résumé file as handed over by the presentation layer, before upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeFile {
    #[cfg(test)]
    pub fn pdf(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: Some(PDF_MEDIA_TYPE.to_string()),
            bytes: bytes.into(),
        }
    }
}

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
