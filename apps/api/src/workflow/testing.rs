//! Scripted in-memory gateway for orchestrator and route tests.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{mpsc, oneshot, Notify};

use crate::gateway::{GatewayError, RemoteGateway};
use crate::models::{JobPosting, MatchResult, Resume, ResumeFile, SearchQuery};

pub fn sample_resume() -> Resume {
    Resume(json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "skills": ["SQL", "Python", "Tableau"]
    }))
}

pub fn job(title: &str) -> JobPosting {
    let mut job = JobPosting::new(title, "Acme", "New York");
    job.link = format!("https://www.indeed.com/viewjob?jk={title}");
    job.full_description = format!("{title} role working with SQL");
    job
}

pub fn jobs(titles: &[&str]) -> Vec<JobPosting> {
    titles.iter().map(|t| job(t)).collect()
}

pub fn match_result(score: f64, matched: &[&str], missing: &[&str], suggestions: &str) -> MatchResult {
    MatchResult {
        match_score: score,
        matched_skills: matched.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        missing_skills: missing.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        suggestions: suggestions.to_string(),
    }
}

/// A match request parked until the test answers it.
pub struct HeldMatch {
    pub job: JobPosting,
    reply: oneshot::Sender<Result<MatchResult, GatewayError>>,
}

impl HeldMatch {
    pub fn respond(self, result: Result<MatchResult, GatewayError>) {
        let _ = self.reply.send(result);
    }
}

enum MatchScript {
    Immediate(Result<MatchResult, GatewayError>),
    Held(mpsc::UnboundedSender<HeldMatch>),
}

pub struct ScriptedGateway {
    upload: Mutex<Result<Resume, GatewayError>>,
    search: Mutex<Result<Vec<JobPosting>, GatewayError>>,
    search_gate: Mutex<Option<Arc<Notify>>>,
    matches: Mutex<MatchScript>,
    email: Mutex<Result<(), GatewayError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            upload: Mutex::new(Ok(sample_resume())),
            search: Mutex::new(Ok(Vec::new())),
            search_gate: Mutex::new(None),
            matches: Mutex::new(MatchScript::Immediate(Ok(match_result(
                0.5,
                &["SQL"],
                &["Python"],
                "Add these skills to your resume: python",
            )))),
            email: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_upload(&self, result: Result<Resume, GatewayError>) {
        *self.upload.lock().unwrap() = result;
    }

    pub fn set_search(&self, result: Result<Vec<JobPosting>, GatewayError>) {
        *self.search.lock().unwrap() = result;
    }

    /// Makes searches wait until the returned handle is notified.
    pub fn gate_search(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.search_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn set_match(&self, result: Result<MatchResult, GatewayError>) {
        *self.matches.lock().unwrap() = MatchScript::Immediate(result);
    }

    /// Parks every following match request; the test answers them in any order.
    pub fn hold_matches(&self) -> mpsc::UnboundedReceiver<HeldMatch> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.matches.lock().unwrap() = MatchScript::Held(tx);
        rx
    }

    pub fn set_email(&self, result: Result<(), GatewayError>) {
        *self.email.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<Resume, GatewayError> {
        self.record(format!("upload_resume:{}", file.file_name));
        self.upload.lock().unwrap().clone()
    }

    async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, GatewayError> {
        self.record(format!(
            "search_jobs:{}|{}|{}",
            query.role, query.location, query.count
        ));
        let gate = self.search_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.search.lock().unwrap().clone()
    }

    async fn match_job(&self, job: &JobPosting) -> Result<MatchResult, GatewayError> {
        self.record(format!("match_job:{}", job.title));
        let reply = {
            let script = self.matches.lock().unwrap();
            match &*script {
                MatchScript::Immediate(result) => return result.clone(),
                MatchScript::Held(requests) => {
                    let (reply, rx) = oneshot::channel();
                    requests
                        .send(HeldMatch {
                            job: job.clone(),
                            reply,
                        })
                        .expect("held-match receiver dropped");
                    rx
                }
            }
        };
        reply
            .await
            .unwrap_or_else(|_| Err(GatewayError::Transport("held match dropped".to_string())))
    }

    async fn email_jobs(&self, email: &str, jobs: &[JobPosting]) -> Result<(), GatewayError> {
        self.record(format!("email_jobs:{}|{}", email, jobs.len()));
        self.email.lock().unwrap().clone()
    }
}
