//! Skill vocabulary: canonical skill names and their synonyms.
//!
//! Loaded once at startup and shared read-only (`Arc<SkillVocabulary>`).
//! Every canonical name and synonym is pre-tokenized with the same normalizer
//! used on documents, so matching is a token-sequence comparison.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{MatchError, Result};
use crate::text::normalizer::normalize;

const BUILTIN_VOCABULARY: &str = include_str!("../../data/skills.json");

/// A tokenized surface form pointing at its canonical skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkillPhrase {
    pub tokens: Vec<String>,
    pub canonical: String,
}

#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    /// canonical name → normalized synonyms
    entries: BTreeMap<String, BTreeSet<String>>,
    /// first token → every phrase starting with it
    index: HashMap<String, Vec<SkillPhrase>>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from a canonical-name → synonyms mapping.
    ///
    /// Names are trimmed and lowercased; duplicate canonical names merge their
    /// synonyms. Fails when the mapping is empty or a canonical name has no
    /// matchable tokens.
    pub fn from_map<I, S, V>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut entries: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (canonical, synonyms) in mapping {
            let canonical = canonical.as_ref().trim().to_lowercase();
            if canonical.is_empty() {
                return Err(MatchError::configuration(
                    "skill vocabulary contains a blank canonical name",
                ));
            }
            if normalize(&canonical).is_empty() {
                return Err(MatchError::configuration(format!(
                    "skill '{canonical}' has no matchable tokens"
                )));
            }

            let slot = entries.entry(canonical).or_default();
            for synonym in synonyms {
                let synonym = synonym.as_ref().trim().to_lowercase();
                if !synonym.is_empty() {
                    slot.insert(synonym);
                }
            }
        }

        if entries.is_empty() {
            return Err(MatchError::configuration("skill vocabulary is empty"));
        }

        let mut index: HashMap<String, Vec<SkillPhrase>> = HashMap::new();
        for (canonical, synonyms) in &entries {
            let surfaces = std::iter::once(canonical).chain(synonyms.iter());
            for surface in surfaces {
                let tokens = normalize(surface).tokens;
                let Some(first) = tokens.first().cloned() else {
                    debug!(skill = %canonical, synonym = %surface, "synonym has no tokens, skipped");
                    continue;
                };
                let bucket = index.entry(first).or_default();
                let phrase = SkillPhrase {
                    tokens,
                    canonical: canonical.clone(),
                };
                if !bucket.contains(&phrase) {
                    bucket.push(phrase);
                }
            }
        }

        Ok(Self { entries, index })
    }

    /// Parses a JSON object of `{"canonical": ["synonym", ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| MatchError::configuration(format!("invalid skill vocabulary JSON: {e}")))?;
        Self::from_map(mapping)
    }

    /// Reads a JSON vocabulary file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MatchError::configuration(format!(
                "cannot read skill vocabulary '{}': {e}",
                path.display()
            ))
        })?;
        let vocabulary = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            skills = vocabulary.len(),
            "Loaded skill vocabulary"
        );
        Ok(vocabulary)
    }

    /// The vocabulary shipped with the crate.
    ///
    /// Skills whose bare name is an everyday English word (excel, spring,
    /// express, windows) are keyed on a qualified phrase such as
    /// "microsoft excel" or "spring boot", so "I excel at teamwork" matches
    /// nothing. A few remaining single-word names ("swift", "oracle") can still
    /// fire on ordinary prose; matching is lexical and has no sense of context.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_VOCABULARY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn synonyms(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(canonical)
    }

    pub(crate) fn phrases_starting_with(&self, token: &str) -> &[SkillPhrase] {
        self.index.get(token).map(Vec::as_slice).unwrap_or(&[])
    }
}
