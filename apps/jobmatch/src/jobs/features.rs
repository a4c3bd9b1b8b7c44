//! Posting side: derives `JobRequirements` from a raw posting.
//!
//! Skills found in a posting are read as required skills; education and
//! year counts are read as minimums. Year ranges are ignored here since in a
//! posting they describe company history, not a requirement.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::errors::{MatchError, Result};
use crate::extraction::sections::SectionExtractor;
use crate::extraction::skills::SkillExtractor;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::jobs::cache::RequirementsCache;
use crate::models::posting::{JobPosting, JobRequirements};
use crate::text::normalizer::normalize;

/// SHA-256 over the posting text and timestamp, hex encoded.
pub fn content_hash(posting: &JobPosting) -> String {
    let mut hasher = Sha256::new();
    hasher.update(posting.full_text().as_bytes());
    hasher.update([0x1f]);
    if let Some(posted_at) = posting.posted_at {
        hasher.update(posted_at.to_rfc3339().as_bytes());
    }
    hex::encode(hasher.finalize())
}

pub struct JobFeatureExtractor {
    skills: SkillExtractor,
    sections: SectionExtractor,
    cache: Arc<dyn RequirementsCache>,
}

impl JobFeatureExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>, cache: Arc<dyn RequirementsCache>) -> Self {
        Self {
            skills: SkillExtractor::new(vocabulary),
            sections: SectionExtractor::default(),
            cache,
        }
    }

    pub fn cache(&self) -> &dyn RequirementsCache {
        self.cache.as_ref()
    }

    /// Returns the requirements for `posting`, from cache when the posting's
    /// content is unchanged since the last extraction.
    ///
    /// Fails with `MatchError::Extraction` for a blank identifier, binary
    /// content or text with no extractable tokens. Failures are never cached, and
    /// a failure evicts any entry left from an earlier version of the posting.
    pub fn extract(&self, posting: &JobPosting) -> Result<Arc<JobRequirements>> {
        if posting.id.trim().is_empty() {
            return Err(MatchError::extraction(
                posting.id.clone(),
                "posting identifier is blank",
            ));
        }

        let hash = content_hash(posting);
        if let Some(cached) = self.cache.get(&posting.id, &hash) {
            debug!(posting_id = %posting.id, "Requirements cache hit");
            return Ok(cached);
        }

        match self.compute(posting, hash) {
            Ok(requirements) => {
                let requirements = Arc::new(requirements);
                self.cache.put(Arc::clone(&requirements));
                Ok(requirements)
            }
            Err(e) => {
                // an edit that broke the posting leaves nothing servable behind
                if self.cache.invalidate(&posting.id) {
                    debug!(posting_id = %posting.id, "Dropped stale requirements entry");
                }
                Err(e)
            }
        }
    }

    fn compute(&self, posting: &JobPosting, content_hash: String) -> Result<JobRequirements> {
        let raw = posting.full_text();
        if raw.contains('\0') {
            return Err(MatchError::extraction(
                posting.id.clone(),
                "posting text contains binary data",
            ));
        }

        let normalized = normalize(&raw);
        if normalized.is_empty() {
            return Err(MatchError::extraction(
                posting.id.clone(),
                "posting text contains no extractable tokens",
            ));
        }

        let required_skills = self.skills.extract(&normalized);
        let min_education = self.sections.education_level(&normalized);
        let min_years_experience = self.sections.explicit_years(&normalized);

        debug!(
            posting_id = %posting.id,
            tokens = normalized.token_count(),
            required_skills = required_skills.len(),
            min_education = ?min_education,
            min_years = ?min_years_experience,
            "Extracted posting requirements"
        );

        Ok(JobRequirements {
            posting_id: posting.id.clone(),
            content_hash,
            required_skills,
            min_education,
            min_years_experience,
            normalized_text: normalized.joined(),
            posted_at: posting.posted_at,
        })
    }
}
