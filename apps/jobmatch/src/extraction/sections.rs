//! Education and experience signals.
//!
//! Education: degree phrases mapped to `EducationLevel`, highest wins.
//! Experience: explicit "N years" counts (maximum wins), falling back to a
//! span estimate over year-range tokens such as `2015-2020`.
//!
//! The year-range fallback is a best-effort estimator. It measures from the
//! earliest start to the latest end, so gaps between jobs and education
//! ranges are counted too. The bias is deliberately optimistic.

use std::collections::BTreeSet;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::education::EducationLevel;
use crate::text::normalizer::NormalizedText;

/// Degree phrases as space-separated token sequences. Every entry reads as a
/// degree on its own; short or ambiguous markers live in the tables below.
const DEGREE_PHRASES: &[(&str, EducationLevel)] = &[
    ("phd", EducationLevel::Doctorate),
    ("doctorate", EducationLevel::Doctorate),
    ("doctoral", EducationLevel::Doctorate),
    ("doctor of philosophy", EducationLevel::Doctorate),
    ("dphil", EducationLevel::Doctorate),
    ("msc", EducationLevel::Master),
    ("mba", EducationLevel::Master),
    ("meng", EducationLevel::Master),
    ("mtech", EducationLevel::Master),
    ("bachelor", EducationLevel::Bachelor),
    ("bachelors", EducationLevel::Bachelor),
    ("bsc", EducationLevel::Bachelor),
    ("bba", EducationLevel::Bachelor),
    ("beng", EducationLevel::Bachelor),
    ("btech", EducationLevel::Bachelor),
    ("undergraduate degree", EducationLevel::Bachelor),
    ("associate degree", EducationLevel::Associate),
    ("associates degree", EducationLevel::Associate),
    ("associate s degree", EducationLevel::Associate),
    ("associate of science", EducationLevel::Associate),
    ("associate of arts", EducationLevel::Associate),
    ("associate of applied science", EducationLevel::Associate),
    ("high school", EducationLevel::HighSchool),
    ("secondary school", EducationLevel::HighSchool),
    ("ged", EducationLevel::HighSchool),
    ("no formal degree", EducationLevel::NoDegree),
    ("no formal education", EducationLevel::NoDegree),
    ("no degree", EducationLevel::NoDegree),
    ("without a degree", EducationLevel::NoDegree),
    ("degree not required", EducationLevel::NoDegree),
];

/// Markers that are ordinary words or initials in prose ("scrum master",
/// "master of none", "MS Office"). They count only when followed by
/// "degree", or by "of"/"in" and a field from `DEGREE_FIELDS`. A possessive
/// "s" token ("master's") in between is skipped.
const QUALIFIED_MARKERS: &[(&str, EducationLevel)] = &[
    ("master", EducationLevel::Master),
    ("masters", EducationLevel::Master),
    ("ms", EducationLevel::Master),
    ("ma", EducationLevel::Master),
    ("bs", EducationLevel::Bachelor),
    ("ba", EducationLevel::Bachelor),
];

const DEGREE_FIELDS: &[&str] = &[
    "accounting", "applied", "arts", "biology", "business", "chemistry", "civil",
    "computer", "computing", "data", "economics", "education", "electrical",
    "engineering", "finance", "fine", "information", "laws", "management",
    "mathematics", "mechanical", "nursing", "philosophy", "physics", "psychology",
    "public", "science", "sciences", "software", "statistics", "technology",
];

/// Dotted abbreviations (`b.s.`, `m.a.`, `ph.d.`). Matched on the cleaned text
/// because tokenizing splits them into single letters that also occur in
/// prose ("i'm a").
static DOTTED_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ph\.d|d\.phil|m\.b\.a|m\.sc|m\.eng|m\.tech|m\.s|m\.a|b\.b\.a|b\.sc|b\.eng|b\.tech|b\.s|b\.a)\b")
        .expect("dotted degree pattern is valid")
});

const YEAR_WORDS: &[&str] = &["year", "years", "yr", "yrs"];

/// Explicit counts above this are treated as noise, not experience.
const MAX_PLAUSIBLE_YEARS: u32 = 50;

/// `5`, `5-7`, `10yrs`, `3years`
static YEAR_COUNT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?:-(\d{1,2}))?(years?|yrs?)?$").expect("year count pattern is valid")
});

/// `2015-2020`, `2018-present`
static YEAR_RANGE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:19|20)\d{2})-((?:19|20)\d{2}|present|current|now|today)$")
        .expect("year range pattern is valid")
});

/// Where an experience estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceSource {
    ExplicitCount,
    YearRanges,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSignals {
    pub education: Option<EducationLevel>,
    pub years_experience: Option<u32>,
    pub experience_source: ExperienceSource,
}

impl SectionSignals {
    pub fn has_any(&self) -> bool {
        self.education.is_some() || self.years_experience.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionExtractor {
    /// Year substituted for open-ended ranges ("2019-present").
    reference_year: i32,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(Utc::now().year())
    }
}

impl SectionExtractor {
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Resume semantics: explicit counts first, year ranges as fallback.
    pub fn extract(&self, text: &NormalizedText) -> SectionSignals {
        let education = self.education_level(text);
        let (years_experience, experience_source) = match self.explicit_years(text) {
            Some(years) => (Some(years), ExperienceSource::ExplicitCount),
            None => match self.year_range_span(text) {
                Some(years) => (Some(years), ExperienceSource::YearRanges),
                None => (None, ExperienceSource::Unspecified),
            },
        };
        SectionSignals {
            education,
            years_experience,
            experience_source,
        }
    }

    /// Highest degree level mentioned, or `None` when no degree marker is
    /// present.
    pub fn education_level(&self, text: &NormalizedText) -> Option<EducationLevel> {
        let phrases = DEGREE_PHRASES
            .iter()
            .filter(|(phrase, _)| contains_phrase(&text.tokens, phrase))
            .map(|(_, level)| *level);
        let qualified = qualified_degrees(&text.tokens);
        let dotted = DOTTED_DEGREE
            .captures_iter(&text.cleaned)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| dotted_level(m.as_str()));

        phrases.chain(qualified).chain(dotted).max()
    }

    /// Largest explicit "N years" count.
    pub fn explicit_years(&self, text: &NormalizedText) -> Option<u32> {
        let tokens = &text.tokens;
        let mut best: Option<u32> = None;

        for (i, token) in tokens.iter().enumerate() {
            let Some(caps) = YEAR_COUNT_TOKEN.captures(token) else {
                continue;
            };
            let followed_by_unit = caps.get(3).is_some()
                || tokens
                    .get(i + 1)
                    .is_some_and(|next| YEAR_WORDS.contains(&next.as_str()));
            if !followed_by_unit {
                continue;
            }

            let low = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
            let high = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
            let Some(years) = low.max(high) else {
                continue;
            };
            if years <= MAX_PLAUSIBLE_YEARS {
                best = best.max(Some(years));
            }
        }
        best
    }

    /// Span from the earliest range start to the latest range end.
    pub fn year_range_span(&self, text: &NormalizedText) -> Option<u32> {
        let ranges: BTreeSet<(i32, i32)> = text
            .tokens
            .iter()
            .filter_map(|token| self.parse_range(token))
            .collect();

        let start = ranges.iter().map(|(s, _)| *s).min()?;
        let end = ranges.iter().map(|(_, e)| *e).max()?;
        u32::try_from(end - start).ok()
    }

    fn parse_range(&self, token: &str) -> Option<(i32, i32)> {
        let caps = YEAR_RANGE_TOKEN.captures(token)?;
        let start: i32 = caps.get(1)?.as_str().parse().ok()?;
        let end = match caps.get(2)?.as_str() {
            "present" | "current" | "now" | "today" => self.reference_year,
            year => year.parse().ok()?,
        };
        (start <= end && start <= self.reference_year).then_some((start, end.min(self.reference_year)))
    }
}

fn qualified_degrees(tokens: &[String]) -> impl Iterator<Item = EducationLevel> + '_ {
    tokens.iter().enumerate().filter_map(|(i, token)| {
        let (_, level) = QUALIFIED_MARKERS
            .iter()
            .find(|(marker, _)| token == marker)?;
        let mut rest = tokens[i + 1..].iter().map(String::as_str).peekable();
        rest.next_if_eq(&"s");
        let qualified = match rest.next()? {
            "degree" | "degrees" => true,
            "of" | "in" => rest.next().is_some_and(|field| DEGREE_FIELDS.contains(&field)),
            _ => false,
        };
        qualified.then_some(*level)
    })
}

fn dotted_level(abbreviation: &str) -> Option<EducationLevel> {
    match abbreviation {
        "ph.d" | "d.phil" => Some(EducationLevel::Doctorate),
        a if a.starts_with("m.") => Some(EducationLevel::Master),
        a if a.starts_with("b.") => Some(EducationLevel::Bachelor),
        _ => None,
    }
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split(' ').collect();
    tokens
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(t, n)| t == n))
}
