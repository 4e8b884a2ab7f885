//! Result cache, the single source of truth for the workflow.
//!
//! Every mutation is one write-lock critical section, so readers see either the
//! state before a setter or the state after it, never a mix. The match staleness
//! check runs inside the same critical section that applies the result.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{JobPosting, MatchResult, Resume};

/// Identity minted for each job-selection event. A match response carries the
/// ticket of the selection it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionTicket(Uuid);

impl SelectionTicket {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchState {
    Pending,
    Ready(MatchResult),
    /// The match request failed; the reason is shown instead of a score.
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub ticket: SelectionTicket,
    pub job: JobPosting,
    pub state: MatchState,
}

/// Modal lifecycle derived from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    Closed,
    MatchPending,
    MatchReady,
    MatchFailed,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub resume: Option<Resume>,
    pub jobs: Vec<JobPosting>,
    pub jobs_fetched_at: Option<DateTime<Utc>>,
    pub selection: Option<Selection>,
    searches_in_flight: usize,
}

impl WorkflowState {
    pub fn search_in_flight(&self) -> bool {
        self.searches_in_flight > 0
    }

    pub fn selected_job(&self) -> Option<&JobPosting> {
        self.selection.as_ref().map(|s| &s.job)
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        match self.selection.as_ref().map(|s| &s.state) {
            Some(MatchState::Ready(result)) => Some(result),
            _ => None,
        }
    }

    pub fn match_error(&self) -> Option<&str> {
        match self.selection.as_ref().map(|s| &s.state) {
            Some(MatchState::Unavailable(reason)) => Some(reason),
            _ => None,
        }
    }

    pub fn modal(&self) -> ModalState {
        match self.selection.as_ref().map(|s| &s.state) {
            None => ModalState::Closed,
            Some(MatchState::Pending) => ModalState::MatchPending,
            Some(MatchState::Ready(_)) => ModalState::MatchReady,
            Some(MatchState::Unavailable(_)) => ModalState::MatchFailed,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultCache {
    state: RwLock<WorkflowState>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-applied setter behind:
    // each setter assigns whole values, so the poisoned state is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, WorkflowState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WorkflowState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WorkflowState {
        self.read().clone()
    }

    pub fn jobs(&self) -> Vec<JobPosting> {
        self.read().jobs.clone()
    }

    pub fn has_resume(&self) -> bool {
        self.read().resume.is_some()
    }

    pub fn set_resume(&self, resume: Resume) {
        self.write().resume = Some(resume);
    }

    /// Replaces the job list wholesale. The selection belongs to the old list,
    /// so it goes too; a match still in flight for it becomes stale.
    pub fn set_jobs(&self, jobs: Vec<JobPosting>) {
        let mut state = self.write();
        state.jobs = jobs;
        state.jobs_fetched_at = Some(Utc::now());
        state.selection = None;
    }

    /// Selects `jobs[index]` with a pending match and returns the ticket the
    /// match request must present to `set_match_result`, together with the job.
    /// Lookup and selection share one critical section, so a search landing in
    /// between cannot leave a job from the replaced list selected.
    pub fn select_job_at(&self, index: usize) -> Option<(SelectionTicket, JobPosting)> {
        let mut state = self.write();
        let job = state.jobs.get(index).cloned()?;
        let ticket = SelectionTicket::mint();
        state.selection = Some(Selection {
            ticket,
            job: job.clone(),
            state: MatchState::Pending,
        });
        Some((ticket, job))
    }

    /// Applies a match outcome if `ticket` still names the current selection.
    /// Returns `false` when the response is stale and was dropped.
    pub fn set_match_result(&self, ticket: SelectionTicket, outcome: MatchState) -> bool {
        let mut state = self.write();
        match state.selection.as_mut() {
            Some(selection) if selection.ticket == ticket => {
                selection.state = outcome;
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&self) {
        self.write().selection = None;
    }

    /// Marks a search as in flight until the returned guard is dropped, so the
    /// flag is released on success, failure and cancellation alike.
    pub fn begin_search(&self) -> SearchInFlight<'_> {
        self.write().searches_in_flight += 1;
        SearchInFlight { cache: self }
    }
}

pub struct SearchInFlight<'a> {
    cache: &'a ResultCache,
}

impl Drop for SearchInFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.cache.write();
        state.searches_in_flight = state.searches_in_flight.saturating_sub(1);
    }
}
