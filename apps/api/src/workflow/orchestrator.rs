//! Workflow orchestrator. Sequences the user intents against the gateway and
//! reconciles their results into the cache.
//!
//! Intents may overlap freely. The only cross-intent rules are:
//! - a search replaces the job list and drops the current selection;
//! - a match response is applied only while its selection is still current.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::gateway::RemoteGateway;
use crate::models::{JobPosting, Resume, ResumeFile, SearchQuery};
use crate::workflow::cache::{MatchState, ResultCache, SelectionTicket};
use crate::workflow::export::jobs_to_csv;
use crate::workflow::validation::{validate_email, validate_resume_file, validate_search};
use crate::workflow::view::WorkflowView;

/// What became of a match response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The response was written to the cache.
    Applied,
    /// The selection changed while the request was in flight.
    Discarded,
}

pub struct WorkflowOrchestrator {
    gateway: Arc<dyn RemoteGateway>,
    cache: ResultCache,
}

impl WorkflowOrchestrator {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            cache: ResultCache::new(),
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> crate::workflow::cache::WorkflowState {
        self.cache.snapshot()
    }

    pub fn view(&self) -> WorkflowView {
        self.cache.snapshot().into()
    }

    /// Uploads a résumé and makes it current. On failure the previous résumé stays.
    pub async fn upload_resume(&self, file: ResumeFile) -> Result<Resume, AppError> {
        validate_resume_file(&file)?;

        let resume = self.gateway.upload_resume(&file).await?;
        info!(
            "Résumé {} parsed (candidate: {})",
            file.file_name,
            resume.candidate_name().unwrap_or("unknown")
        );
        self.cache.set_resume(resume.clone());
        Ok(resume)
    }

    /// Runs a search and replaces the job list with the response, in response order.
    /// On failure the previous list stays; the in-flight flag is released either way.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<JobPosting>, AppError> {
        validate_search(&query)?;

        let _in_flight = self.cache.begin_search();
        let jobs = self.gateway.search_jobs(&query).await.map_err(|e| {
            warn!("Search for '{}' in '{}' failed: {e}", query.role, query.location);
            e
        })?;

        info!(
            "Search for '{}' in '{}' returned {} job(s)",
            query.role,
            query.location,
            jobs.len()
        );
        self.cache.set_jobs(jobs.clone());
        Ok(jobs)
    }

    /// Selects `jobs[index]` with a pending match and resolves the match in a
    /// background task. The task yields what became of the response.
    pub fn select_job(
        self: &Arc<Self>,
        index: usize,
    ) -> Result<JoinHandle<MatchOutcome>, AppError> {
        let (ticket, job) = self.begin_match(index)?;
        let orchestrator = Arc::clone(self);
        Ok(tokio::spawn(async move {
            orchestrator.complete_match(ticket, job).await
        }))
    }

    /// Requires an uploaded résumé, since the match service scores against it.
    fn begin_match(&self, index: usize) -> Result<(SelectionTicket, JobPosting), AppError> {
        if !self.cache.has_resume() {
            return Err(AppError::validation(
                "Upload a résumé before checking job fit",
            ));
        }
        let (ticket, job) = self
            .cache
            .select_job_at(index)
            .ok_or_else(|| AppError::NotFound(format!("No job at index {index}")))?;
        debug!("Selected {}", job.label());
        Ok((ticket, job))
    }

    /// Applies the match response only if `ticket` is still the current selection.
    async fn complete_match(&self, ticket: SelectionTicket, job: JobPosting) -> MatchOutcome {
        let state = match self.gateway.match_job(&job).await {
            Ok(result) => MatchState::Ready(result),
            Err(e) => {
                warn!("Match for {} failed: {e}", job.label());
                MatchState::Unavailable(e.to_string())
            }
        };

        if self.cache.set_match_result(ticket, state) {
            MatchOutcome::Applied
        } else {
            debug!("Discarding stale match response for {}", job.label());
            MatchOutcome::Discarded
        }
    }

    /// Closes the match modal. A response still in flight will be discarded.
    pub fn close_match(&self) {
        self.cache.clear_selection();
    }

    /// Renders the current job list as CSV. Local only.
    pub fn download_csv(&self) -> Result<String, AppError> {
        Ok(jobs_to_csv(&self.cache.jobs())?)
    }

    /// Emails the current job list to `address`. No retry.
    pub async fn email_jobs(&self, address: &str) -> Result<(), AppError> {
        validate_email(address)?;
        let jobs = self.cache.jobs();
        if jobs.is_empty() {
            return Err(AppError::validation("There are no jobs to send"));
        }

        self.gateway.email_jobs(address.trim(), &jobs).await?;
        info!("Sent {} job(s) by email", jobs.len());
        Ok(())
    }
}
