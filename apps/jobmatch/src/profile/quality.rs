use serde::{Deserialize, Serialize};

use crate::extraction::sections::SectionSignals;
use crate::models::profile::ContactInfo;

/// Resumes shorter than this many tokens are flagged.
pub const DEFAULT_MIN_TOKENS: usize = 100;

/// Below this many skills a "add more skills" recommendation is emitted.
const FEW_SKILLS_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheck {
    ContactInfo,
    Length,
    Skills,
    EducationOrExperience,
}

/// Point deduction per failed check, in reporting order. Sums to 100.
const DEDUCTIONS: &[(QualityCheck, u32)] = &[
    (QualityCheck::ContactInfo, 20),
    (QualityCheck::Length, 20),
    (QualityCheck::Skills, 30),
    (QualityCheck::EducationOrExperience, 30),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0 – 100
    pub score: u32,
    pub failed_checks: Vec<QualityCheck>,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Signals the assessor looks at, all taken from one normalized document.
#[derive(Debug, Clone, Copy)]
pub struct QualityInputs<'a> {
    pub contact: &'a ContactInfo,
    pub token_count: usize,
    pub skill_count: usize,
    pub sections: &'a SectionSignals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityAssessor {
    min_tokens: usize,
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKENS)
    }
}

impl QualityAssessor {
    pub fn new(min_tokens: usize) -> Self {
        Self { min_tokens }
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    /// Scores completeness. Checks run in fixed order (contact, length,
    /// skills, education/experience) so issue lists are reproducible.
    pub fn assess(&self, inputs: QualityInputs<'_>) -> QualityReport {
        let mut score: u32 = 100;
        let mut failed_checks = Vec::new();
        let mut issues = Vec::new();

        for (check, deduction) in DEDUCTIONS {
            if self.passes(*check, &inputs) {
                continue;
            }
            score = score.saturating_sub(*deduction);
            failed_checks.push(*check);
            issues.push(self.issue_text(*check, &inputs));
        }

        QualityReport {
            score,
            failed_checks,
            issues,
            recommendations: recommendations(&inputs),
        }
    }

    fn passes(&self, check: QualityCheck, inputs: &QualityInputs<'_>) -> bool {
        match check {
            QualityCheck::ContactInfo => inputs.contact.has_direct_contact(),
            QualityCheck::Length => inputs.token_count >= self.min_tokens,
            QualityCheck::Skills => inputs.skill_count > 0,
            QualityCheck::EducationOrExperience => inputs.sections.has_any(),
        }
    }

    fn issue_text(&self, check: QualityCheck, inputs: &QualityInputs<'_>) -> String {
        match check {
            QualityCheck::ContactInfo => "No contact information (email or phone) found".to_string(),
            QualityCheck::Length => format!(
                "Resume is too short ({} tokens, minimum {})",
                inputs.token_count, self.min_tokens
            ),
            QualityCheck::Skills => "No recognized skills found".to_string(),
            QualityCheck::EducationOrExperience => {
                "No education or experience information found".to_string()
            }
        }
    }
}

fn recommendations(inputs: &QualityInputs<'_>) -> Vec<String> {
    let mut recs = Vec::new();
    if inputs.skill_count == 0 {
        recs.push("Add a clear skills section with technical competencies".to_string());
    }
    if inputs.sections.education.is_none() {
        recs.push("Include education background and qualifications".to_string());
    }
    if inputs.sections.years_experience.is_none() {
        recs.push("Add work experience with specific achievements".to_string());
    }
    if inputs.contact.email.is_none() {
        recs.push("Include a contact email address".to_string());
    }
    if inputs.skill_count < FEW_SKILLS_THRESHOLD {
        recs.push("Consider adding more relevant technical skills".to_string());
    }
    recs
}
