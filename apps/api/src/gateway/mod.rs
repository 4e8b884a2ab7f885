//! Remote gateway: the single point of entry for the four JobScout services.
//!
//! No other module talks to the remote services directly. The orchestrator
//! only sees the `RemoteGateway` trait, carried as `Arc<dyn RemoteGateway>`, so
//! tests can swap in a scripted implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{JobPosting, MatchResult, Resume, ResumeFile, SearchQuery};

pub mod http;

pub use http::HttpGateway;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Network failure, refused connection or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a body we could not decode.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The service answered with a non-success status.
    #[error("service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Transport(format!("request timed out: {err}"))
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Request/response contract of the remote services. Implementations encode
/// requests and decode responses only: no caching, no retries.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<Resume, GatewayError>;

    async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, GatewayError>;

    /// The service already holds the résumé from the last upload; only the job travels.
    async fn match_job(&self, job: &JobPosting) -> Result<MatchResult, GatewayError>;

    async fn email_jobs(&self, email: &str, jobs: &[JobPosting]) -> Result<(), GatewayError>;
}
