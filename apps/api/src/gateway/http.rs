use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{GatewayError, RemoteGateway};
use crate::models::{JobPosting, MatchResult, Resume, ResumeFile, SearchQuery, PDF_MEDIA_TYPE};

const UPLOAD_RESUME_PATH: &str = "/upload_resume";
const SEARCH_JOBS_PATH: &str = "/scrape_jobs";
const MATCH_JOB_PATH: &str = "/match_job";
const EMAIL_JOBS_PATH: &str = "/send_jobs_email";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    resume: Option<Resume>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
    jobs: &'a [JobPosting],
}

/// FastAPI-style error body: `{ "detail": "..." }`.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    detail: String,
}

/// `RemoteGateway` over HTTP, talking to the JobScout backend.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the raw body of a 2xx response.
    /// Any other status becomes `GatewayError::Service`.
    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<String, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // The status alone decides the error; an unreadable body only loses the detail.
            let body = response.text().await.unwrap_or_default();
            let message = service_message(status, body);
            warn!("{operation} failed with status {status}: {message}");
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        debug!("{operation} succeeded with status {status}");
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T, GatewayError> {
        let body = self.send(request, operation).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Prefers the FastAPI `detail`, then the raw body, then the status reason.
fn service_message(status: StatusCode, body: String) -> String {
    if let Ok(error) = serde_json::from_str::<ServiceErrorBody>(&body) {
        return error.detail;
    }
    if !body.trim().is_empty() {
        return body;
    }
    status
        .canonical_reason()
        .unwrap_or("unknown service error")
        .to_string()
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<Resume, GatewayError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part("file", part);

        info!("Uploading résumé {} ({} bytes)", file.file_name, file.bytes.len());
        let request = self.client.post(self.url(UPLOAD_RESUME_PATH)).multipart(form);
        let response: UploadResponse = self.send_json(request, "upload_resume").await?;

        response
            .resume
            .ok_or_else(|| GatewayError::Decode("upload response carries no résumé".to_string()))
    }

    async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, GatewayError> {
        let form = Form::new()
            .text("role", query.role.clone())
            .text("location", query.location.clone())
            .text("frequency", query.count.to_string());

        info!(
            "Searching {} job(s) for '{}' in '{}'",
            query.count, query.role, query.location
        );
        let request = self.client.post(self.url(SEARCH_JOBS_PATH)).multipart(form);
        let response: SearchResponse = self.send_json(request, "scrape_jobs").await?;

        Ok(response.jobs)
    }

    async fn match_job(&self, job: &JobPosting) -> Result<MatchResult, GatewayError> {
        debug!("Requesting match for {}", job.label());
        let request = self.client.post(self.url(MATCH_JOB_PATH)).json(job);
        let result: MatchResult = self.send_json(request, "match_job").await?;

        if !result.score_in_range() {
            return Err(GatewayError::Decode(format!(
                "match_score {} is outside [0, 1]",
                result.match_score
            )));
        }
        Ok(result)
    }

    async fn email_jobs(&self, email: &str, jobs: &[JobPosting]) -> Result<(), GatewayError> {
        info!("Emailing {} job(s)", jobs.len());
        let request = self
            .client
            .post(self.url(EMAIL_JOBS_PATH))
            .json(&EmailRequest { email, jobs });
        self.send(request, "send_jobs_email").await?;
        Ok(())
    }
}
