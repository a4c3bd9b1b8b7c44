use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{MatchError, Result};
use crate::extraction::contact::extract_contact_info;
use crate::extraction::sections::SectionExtractor;
use crate::extraction::skills::SkillExtractor;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::models::profile::CandidateProfile;
use crate::profile::quality::{QualityAssessor, QualityInputs};
use crate::text::keywords::{top_keywords, DEFAULT_KEYWORD_LIMIT};
use crate::text::normalizer::{normalize, NormalizedText};

/// Turns decoded resume text into a `CandidateProfile`.
///
/// Pure orchestration: the text is normalized once and that single form is
/// handed to every extractor.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    skills: SkillExtractor,
    sections: SectionExtractor,
    quality: QualityAssessor,
    keyword_limit: usize,
}

impl ProfileBuilder {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self {
            skills: SkillExtractor::new(vocabulary),
            sections: SectionExtractor::default(),
            quality: QualityAssessor::default(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
        }
    }

    pub fn with_section_extractor(mut self, sections: SectionExtractor) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_quality_assessor(mut self, quality: QualityAssessor) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = limit;
        self
    }

    /// Builds a profile, failing with `MatchError::Input` when the text is
    /// empty or normalizes to zero tokens.
    pub fn try_build(&self, source_id: &str, raw_text: &str) -> Result<CandidateProfile> {
        if raw_text.trim().is_empty() {
            return Err(MatchError::input("resume text is empty"));
        }
        let normalized = normalize(raw_text);
        if normalized.is_empty() {
            return Err(MatchError::input("resume text contains no extractable tokens"));
        }
        Ok(self.assemble(source_id, &normalized))
    }

    /// Builds a profile, never failing.
    ///
    /// Unusable input yields a degraded profile: no skills, unspecified
    /// education and experience, quality score 0 with every issue flagged.
    pub fn build(&self, source_id: &str, raw_text: &str) -> CandidateProfile {
        match self.try_build(source_id, raw_text) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(source_id, error = %e, "Resume unusable, returning degraded profile");
                self.assemble(source_id, &NormalizedText::default())
            }
        }
    }

    fn assemble(&self, source_id: &str, normalized: &NormalizedText) -> CandidateProfile {
        let skills = self.skills.extract(normalized);
        let sections = self.sections.extract(normalized);
        let contact = extract_contact_info(normalized);
        let report = self.quality.assess(QualityInputs {
            contact: &contact,
            token_count: normalized.token_count(),
            skill_count: skills.len(),
            sections: &sections,
        });

        debug!(
            source_id,
            tokens = normalized.token_count(),
            skills = skills.len(),
            education = ?sections.education,
            years = ?sections.years_experience,
            experience_source = ?sections.experience_source,
            quality = report.score,
            "Built candidate profile"
        );

        CandidateProfile {
            profile_id: Uuid::new_v4(),
            source_id: source_id.to_string(),
            skills,
            education: sections.education,
            years_experience: sections.years_experience,
            normalized_text: normalized.joined(),
            quality_score: report.score,
            quality_issues: report.issues,
            recommendations: report.recommendations,
            contact,
            top_keywords: top_keywords(normalized, self.keyword_limit),
            token_count: normalized.token_count(),
            created_at: Utc::now(),
        }
    }
}
