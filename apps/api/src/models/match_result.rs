use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Scored comparison between the uploaded résumé and one job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: f64, // 0.0 – 1.0
    #[serde(default)]
    pub matched_skills: BTreeSet<String>,
    #[serde(default)]
    pub missing_skills: BTreeSet<String>,
    #[serde(default)]
    pub suggestions: String,
}

/// Coarse bucket of a match score, used by the presentation layer for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,   // ≥ 0.75
    Moderate, // 0.5 – 0.74
    Weak,
}

impl MatchResult {
    /// Score as a whole percentage, e.g. 0.82 → 82.
    pub fn score_percent(&self) -> u32 {
        (self.match_score * 100.0).round().clamp(0.0, 100.0) as u32
    }

    pub fn score_band(&self) -> ScoreBand {
        if self.match_score >= 0.75 {
            ScoreBand::Strong
        } else if self.match_score >= 0.5 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn score_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.match_score)
    }
}
