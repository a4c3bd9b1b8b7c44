//! MatchingPipeline: profile in, ranked postings out.
//!
//! Each posting is evaluated independently. A posting whose requirements
//! cannot be extracted lands in `MatchBatch::failures`; the rest of the batch
//! is unaffected.

use std::cmp::Ordering;
use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{MatchError, Result};
use crate::extraction::vocabulary::SkillVocabulary;
use crate::jobs::cache::{cache_with_capacity, RequirementsCache};
use crate::jobs::features::JobFeatureExtractor;
use crate::matching::explanation::ExplanationGenerator;
use crate::matching::scorer::{FitScorer, WeightedFitScorer};
use crate::matching::weights::MatchWeights;
use crate::models::matching::{MatchBand, MatchResult};
use crate::models::posting::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::profile::builder::ProfileBuilder;
use crate::profile::quality::{QualityAssessor, DEFAULT_MIN_TOKENS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub weights: MatchWeights,
    /// Resumes shorter than this lose the length points of the quality score.
    pub min_resume_tokens: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            min_resume_tokens: DEFAULT_MIN_TOKENS,
        }
    }
}

/// A posting that could not be scored, reported beside the ranked results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingFailure {
    pub posting_id: String,
    pub code: String,
    pub reason: String,
}

impl PostingFailure {
    fn from_error(posting_id: &str, error: &MatchError) -> Self {
        let reason = match error {
            MatchError::Extraction { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        Self {
            posting_id: posting_id.to_string(),
            code: error.code().to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBatch {
    /// Best match first.
    pub results: Vec<MatchResult>,
    /// In input order.
    pub failures: Vec<PostingFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub profile: CandidateProfile,
    pub batch: MatchBatch,
}

pub struct MatchingPipeline {
    profiles: ProfileBuilder,
    features: JobFeatureExtractor,
    scorer: Arc<dyn FitScorer>,
    explanations: ExplanationGenerator,
}

impl MatchingPipeline {
    /// Fails with `MatchError::Configuration` on an empty vocabulary or
    /// weights that do not sum to 1.0.
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        settings: PipelineSettings,
        cache: Arc<dyn RequirementsCache>,
    ) -> Result<Self> {
        let scorer = WeightedFitScorer::new(settings.weights)?;
        Self::with_scorer(vocabulary, settings, cache, Arc::new(scorer))
    }

    /// Same as `new` but with a caller-supplied scoring backend.
    pub fn with_scorer(
        vocabulary: Arc<SkillVocabulary>,
        settings: PipelineSettings,
        cache: Arc<dyn RequirementsCache>,
        scorer: Arc<dyn FitScorer>,
    ) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(MatchError::configuration("skill vocabulary is empty"));
        }
        settings.weights.validate()?;

        let profiles = ProfileBuilder::new(Arc::clone(&vocabulary))
            .with_quality_assessor(QualityAssessor::new(settings.min_resume_tokens));
        let features = JobFeatureExtractor::new(vocabulary, cache);

        Ok(Self {
            profiles,
            features,
            scorer,
            explanations: ExplanationGenerator,
        })
    }

    /// Wires the pipeline from startup configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let vocabulary = config.load_vocabulary()?;
        let cache = cache_with_capacity(config.cache_capacity)
            .context("Failed to create requirements cache")?;
        let settings = PipelineSettings {
            weights: config.weights,
            min_resume_tokens: config.min_resume_tokens,
        };
        let pipeline = Self::new(Arc::new(vocabulary), settings, cache)
            .context("Failed to build matching pipeline")?;

        info!(
            backend = pipeline.scorer.backend(),
            cache_capacity = config.cache_capacity,
            min_resume_tokens = config.min_resume_tokens,
            "Matching pipeline ready"
        );
        Ok(pipeline)
    }

    pub fn profile_builder(&self) -> &ProfileBuilder {
        &self.profiles
    }

    pub fn feature_extractor(&self) -> &JobFeatureExtractor {
        &self.features
    }

    pub fn cache(&self) -> &dyn RequirementsCache {
        self.features.cache()
    }

    /// Never fails; unusable text yields a degraded profile.
    pub fn build_profile(&self, source_id: &str, raw_text: &str) -> CandidateProfile {
        self.profiles.build(source_id, raw_text)
    }

    /// Scores `profile` against every posting.
    ///
    /// Results are ordered by composite score descending, then by recency
    /// (newest first, undated last), then by posting id ascending. The order
    /// does not depend on the order postings finish scoring.
    pub fn rank(&self, profile: &CandidateProfile, postings: &[JobPosting]) -> MatchBatch {
        let outcomes: Vec<(&JobPosting, Result<MatchResult>)> = postings
            .par_iter()
            .map(|posting| (posting, self.score_posting(profile, posting)))
            .collect();

        let mut batch = MatchBatch::default();
        for (posting, outcome) in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(e) => {
                    warn!(posting_id = %posting.id, error = %e, "Skipping posting");
                    batch.failures.push(PostingFailure::from_error(&posting.id, &e));
                }
            }
        }
        batch.results.sort_by(compare_results);

        info!(
            source_id = %profile.source_id,
            postings = postings.len(),
            scored = batch.results.len(),
            failed = batch.failures.len(),
            "Ranked postings"
        );
        batch
    }

    /// Builds the profile and ranks `postings` against it.
    pub fn match_resume(
        &self,
        source_id: &str,
        raw_text: &str,
        postings: &[JobPosting],
    ) -> MatchReport {
        let profile = self.build_profile(source_id, raw_text);
        let batch = self.rank(&profile, postings);
        MatchReport { profile, batch }
    }

    fn score_posting(
        &self,
        profile: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<MatchResult> {
        let requirements = self.features.extract(posting)?;
        let breakdown = self.scorer.score(profile, &requirements);
        let explanation = self.explanations.explain(profile, &requirements, &breakdown);

        Ok(MatchResult {
            posting_id: posting.id.clone(),
            composite_score: breakdown.composite,
            sub_scores: breakdown.sub_scores,
            band: MatchBand::from_score(breakdown.composite),
            matched_skills: breakdown.matched_skills,
            missing_skills: breakdown.missing_skills,
            explanation: explanation.sentences,
            recommendations: explanation.recommendations,
            posted_at: posting.posted_at,
        })
    }
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.composite_score
        .total_cmp(&a.composite_score)
        // Option orders None first, so reversing puts newest first, undated last
        .then_with(|| b.posted_at.cmp(&a.posted_at))
        .then_with(|| a.posting_id.cmp(&b.posting_id))
}
