pub mod job;
pub mod match_result;
pub mod resume;

pub use job::{JobPosting, SearchQuery};
pub use match_result::{MatchResult, ScoreBand};
pub use resume::{Resume, ResumeFile, PDF_MEDIA_TYPE};
