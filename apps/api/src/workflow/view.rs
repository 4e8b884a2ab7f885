use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{JobPosting, MatchResult, Resume, ScoreBand};
use crate::workflow::cache::{ModalState, WorkflowState};

/// Derived view-state handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowView {
    pub resume: Option<Resume>,
    pub jobs: Vec<JobPosting>,
    pub jobs_fetched_at: Option<DateTime<Utc>>,
    pub search_in_flight: bool,
    pub modal: ModalState,
    pub selected_job: Option<JobPosting>,
    #[serde(rename = "match")]
    pub match_result: Option<MatchView>,
    pub match_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub result: MatchResult,
    pub score_percent: u32,
    pub score_band: ScoreBand,
}

impl From<MatchResult> for MatchView {
    fn from(result: MatchResult) -> Self {
        Self {
            score_percent: result.score_percent(),
            score_band: result.score_band(),
            result,
        }
    }
}

impl From<WorkflowState> for WorkflowView {
    fn from(state: WorkflowState) -> Self {
        Self {
            search_in_flight: state.search_in_flight(),
            modal: state.modal(),
            selected_job: state.selected_job().cloned(),
            match_result: state.match_result().cloned().map(MatchView::from),
            match_error: state.match_error().map(str::to_string),
            resume: state.resume,
            jobs: state.jobs,
            jobs_fetched_at: state.jobs_fetched_at,
        }
    }
}
