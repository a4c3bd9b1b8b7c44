use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four independently computed factors, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub text_similarity: f64,
}

impl SubScores {
    pub fn new(skills: f64, experience: f64, education: f64, text_similarity: f64) -> Self {
        Self {
            skills,
            experience,
            education,
            text_similarity,
        }
    }

    /// Copy with every factor clamped to [0, 100]. NaN becomes 0.
    pub fn clamped(&self) -> Self {
        Self {
            skills: clamp_score(self.skills),
            experience: clamp_score(self.experience),
            education: clamp_score(self.education),
            text_similarity: clamp_score(self.text_similarity),
        }
    }
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Coarse label for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => MatchBand::Excellent,
            s if s >= 60.0 => MatchBand::Good,
            s if s >= 40.0 => MatchBand::Fair,
            _ => MatchBand::Poor,
        }
    }
}

/// One scored posting. Built fresh on every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub posting_id: String,
    /// 0.0 – 100.0
    pub composite_score: f64,
    pub sub_scores: SubScores,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub explanation: Vec<String>,
    pub band: MatchBand,
    pub recommendations: Vec<String>,
    pub posted_at: Option<DateTime<Utc>>,
}
