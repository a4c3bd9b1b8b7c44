//! Match scoring: pluggable, trait-based scorer that measures a candidate
//! profile against a posting's requirements.
//!
//! Default: `WeightedFitScorer` (pure, deterministic, fully testable).
//! The pipeline holds an `Arc<dyn FitScorer>` so backends can be swapped.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::matching::similarity::text_similarity_score;
use crate::matching::weights::MatchWeights;
use crate::models::education::EducationLevel;
use crate::models::matching::SubScores;
use crate::models::posting::JobRequirements;
use crate::models::profile::CandidateProfile;

/// Education score by number of levels the candidate falls short.
/// Index 0 = meets the requirement; anything past the table scores 0.
pub const EDUCATION_SHORTFALL_SCORES: [f64; 3] = [100.0, 60.0, 30.0];

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sub_scores: SubScores,
    /// 0.0 – 100.0
    pub composite: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the pipeline.
pub trait FitScorer: Send + Sync {
    fn score(&self, profile: &CandidateProfile, requirements: &JobRequirements) -> ScoreBreakdown;

    /// Backend label, surfaced in logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedFitScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Four-factor weighted scorer.
///
/// Algorithm:
/// 1. skills = 100 × |profile ∩ required| / |required| (100 when nothing is required)
/// 2. experience = 100 when either side is unspecified or the minimum is met,
///    else 100 × profile / required
/// 3. education = 100 when either side is unspecified or the minimum is met,
///    else `EDUCATION_SHORTFALL_SCORES[levels short]`
/// 4. text similarity = 100 × cosine over content tokens
/// 5. composite = weighted sum of the clamped factors
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedFitScorer {
    weights: MatchWeights,
}

impl WeightedFitScorer {
    pub fn new(weights: MatchWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }
}

impl FitScorer for WeightedFitScorer {
    fn score(&self, profile: &CandidateProfile, requirements: &JobRequirements) -> ScoreBreakdown {
        let matched_skills: BTreeSet<String> = requirements
            .required_skills
            .intersection(&profile.skills)
            .cloned()
            .collect();
        let missing_skills: BTreeSet<String> = requirements
            .required_skills
            .difference(&profile.skills)
            .cloned()
            .collect();

        let sub_scores = SubScores {
            skills: skills_score(matched_skills.len(), requirements.required_skills.len()),
            experience: experience_score(
                profile.years_experience,
                requirements.min_years_experience,
            ),
            education: education_score(profile.education, requirements.min_education),
            text_similarity: text_similarity_score(profile.tokens(), requirements.tokens()),
        }
        .clamped();

        ScoreBreakdown {
            composite: self.weights.composite(&sub_scores),
            sub_scores,
            matched_skills,
            missing_skills,
        }
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Factor functions
// ────────────────────────────────────────────────────────────────────────────

pub fn skills_score(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 100.0;
    }
    (100.0 * matched.min(required) as f64 / required as f64).clamp(0.0, 100.0)
}

/// Unspecified on either side is a pass, not a failure.
pub fn experience_score(profile_years: Option<u32>, required_years: Option<u32>) -> f64 {
    match (profile_years, required_years) {
        (Some(have), Some(need)) if have < need => (100.0 * have as f64 / need as f64).max(0.0),
        _ => 100.0,
    }
}

/// Unspecified on either side is a pass, as for experience.
pub fn education_score(
    profile_level: Option<EducationLevel>,
    required_level: Option<EducationLevel>,
) -> f64 {
    match (profile_level, required_level) {
        (Some(have), Some(need)) => {
            let shortfall = usize::from(have.shortfall_to(need));
            EDUCATION_SHORTFALL_SCORES
                .get(shortfall)
                .copied()
                .unwrap_or(0.0)
        }
        _ => 100.0,
    }
}
