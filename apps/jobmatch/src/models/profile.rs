use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::education::EducationLevel;

/// Contact details found in resume text. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ContactInfo {
    /// Email or phone is what recruiters need to reach a candidate.
    pub fn has_direct_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }

    pub fn field_count(&self) -> usize {
        [&self.email, &self.phone, &self.linkedin, &self.github]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}

/// Structured candidate representation built from one resume upload.
///
/// Never mutated after construction; a new upload yields a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub profile_id: Uuid,
    /// Opaque identifier supplied by the ingestion collaborator.
    pub source_id: String,
    pub skills: BTreeSet<String>,
    /// `None` = unspecified.
    pub education: Option<EducationLevel>,
    /// `None` = unspecified.
    pub years_experience: Option<u32>,
    /// Space-joined normalized tokens, used for text similarity.
    pub normalized_text: String,
    /// 0 – 100
    pub quality_score: u32,
    pub quality_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub contact: ContactInfo,
    pub top_keywords: Vec<String>,
    pub token_count: usize,
    pub created_at: DateTime<Utc>,
}

impl CandidateProfile {
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized_text.split_whitespace()
    }

    pub fn has_skill(&self, canonical: &str) -> bool {
        self.skills.contains(canonical)
    }
}
