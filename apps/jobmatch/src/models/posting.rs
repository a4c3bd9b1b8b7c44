use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::education::EducationLevel;

/// A job listing record as delivered by the retrieval collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    /// Used only to break score ties; newer postings rank first.
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = requirements.into();
        self
    }

    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = Some(posted_at);
        self
    }

    /// Title, description and requirements joined on separate lines.
    pub fn full_text(&self) -> String {
        [&self.title, &self.description, &self.requirements]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Requirement view of a posting, derived once per (id, content hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub posting_id: String,
    /// SHA-256 of the posting's full text, hex encoded.
    pub content_hash: String,
    pub required_skills: BTreeSet<String>,
    /// `None` = unspecified.
    pub min_education: Option<EducationLevel>,
    /// `None` = unspecified.
    pub min_years_experience: Option<u32>,
    pub normalized_text: String,
    pub posted_at: Option<DateTime<Utc>>,
}

impl JobRequirements {
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized_text.split_whitespace()
    }
}
