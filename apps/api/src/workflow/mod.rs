// Workflow orchestration: résumé upload, job search, fit matching and export.
// All remote calls go through the gateway; nothing here builds HTTP requests.

pub mod cache;
pub mod export;
pub mod handlers;
pub mod orchestrator;
pub mod validation;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use orchestrator::WorkflowOrchestrator;
