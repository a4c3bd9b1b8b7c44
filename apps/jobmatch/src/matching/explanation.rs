//! Human-readable breakdown of a score.
//!
//! Sentence order is fixed: skills, experience, education, text similarity,
//! then the missing-skills summary when there is one.

use std::collections::BTreeSet;

use crate::matching::scorer::ScoreBreakdown;
use crate::models::education::EducationLevel;
use crate::models::posting::JobRequirements;
use crate::models::profile::CandidateProfile;

/// Below these sub-scores a recommendation is attached.
const SKILLS_RECOMMENDATION_BELOW: f64 = 70.0;
const EXPERIENCE_RECOMMENDATION_BELOW: f64 = 60.0;
const EDUCATION_RECOMMENDATION_BELOW: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub sentences: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Stateless; one shared instance serves every posting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn explain(
        &self,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
        breakdown: &ScoreBreakdown,
    ) -> Explanation {
        explain(profile, requirements, breakdown)
    }
}

fn explain(
    profile: &CandidateProfile,
    requirements: &JobRequirements,
    breakdown: &ScoreBreakdown,
) -> Explanation {
    let s = &breakdown.sub_scores;
    let mut sentences = vec![
        skills_sentence(s.skills, &breakdown.matched_skills, requirements.required_skills.len()),
        experience_sentence(
            s.experience,
            profile.years_experience,
            requirements.min_years_experience,
        ),
        education_sentence(s.education, profile.education, requirements.min_education),
        format!(
            "Text similarity: {} - overall vocabulary overlap between resume and posting",
            percent(s.text_similarity)
        ),
    ];
    if !breakdown.missing_skills.is_empty() {
        sentences.push(format!("Missing skills: {}", join(&breakdown.missing_skills)));
    }

    let mut recommendations = Vec::new();
    if s.skills < SKILLS_RECOMMENDATION_BELOW {
        recommendations.push("Consider developing skills mentioned in the job requirements".to_string());
    }
    if s.experience < EXPERIENCE_RECOMMENDATION_BELOW {
        recommendations.push("Highlight relevant experience that matches job requirements".to_string());
    }
    if s.education < EDUCATION_RECOMMENDATION_BELOW {
        recommendations.push("Consider relevant certifications or education".to_string());
    }

    Explanation {
        sentences,
        recommendations,
    }
}

fn skills_sentence(score: f64, matched: &BTreeSet<String>, required: usize) -> String {
    if required == 0 {
        return format!(
            "Skills: {} - the posting lists no recognized required skills",
            percent(score)
        );
    }
    let mut sentence = format!(
        "Skills: {} - {} of {} required skills matched",
        percent(score),
        matched.len(),
        required
    );
    if !matched.is_empty() {
        sentence.push_str(&format!(" ({})", join(matched)));
    }
    sentence
}

fn experience_sentence(score: f64, have: Option<u32>, need: Option<u32>) -> String {
    let detail = match (have, need) {
        (_, None) => "the posting states no minimum".to_string(),
        (None, Some(need)) => format!(
            "the resume does not state years of experience, not penalized against the {} minimum",
            years(need)
        ),
        (Some(have), Some(need)) if have >= need => {
            format!("{} meets the {} minimum", years(have), years(need))
        }
        (Some(have), Some(need)) => {
            format!("{} against a {} minimum", years(have), years(need))
        }
    };
    format!("Experience: {} - {detail}", percent(score))
}

fn education_sentence(
    score: f64,
    have: Option<EducationLevel>,
    need: Option<EducationLevel>,
) -> String {
    let detail = match (have, need) {
        (_, None) => "the posting states no education requirement".to_string(),
        (None, Some(need)) => format!(
            "the resume does not state a degree, not penalized against the required {need}"
        ),
        (Some(have), Some(need)) if have >= need => {
            format!("{have} meets the required {need}")
        }
        (Some(have), Some(need)) => {
            let short = have.shortfall_to(need);
            let levels = if short == 1 { "level" } else { "levels" };
            format!("{have} is {short} {levels} below the required {need}")
        }
    };
    format!("Education: {} - {detail}", percent(score))
}

fn percent(score: f64) -> String {
    format!("{score:.0}%")
}

fn years(n: u32) -> String {
    if n == 1 {
        "1 year".to_string()
    } else {
        format!("{n} years")
    }
}

fn join(skills: &BTreeSet<String>) -> String {
    skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
