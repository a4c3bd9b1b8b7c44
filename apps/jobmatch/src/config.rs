use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::extraction::vocabulary::SkillVocabulary;
use crate::matching::weights::MatchWeights;
use crate::profile::quality::DEFAULT_MIN_TOKENS;

pub const DEFAULT_CACHE_CAPACITY: usize = 512;

const WEIGHT_VARS: [&str; 4] = [
    "JOBMATCH_WEIGHT_SKILLS",
    "JOBMATCH_WEIGHT_EXPERIENCE",
    "JOBMATCH_WEIGHT_EDUCATION",
    "JOBMATCH_WEIGHT_TEXT_SIMILARITY",
];

/// Matching configuration loaded from environment variables.
/// Every variable is optional; unset means the built-in default.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON skill vocabulary; `None` uses the built-in one.
    pub vocabulary_path: Option<PathBuf>,
    pub weights: MatchWeights,
    pub min_resume_tokens: usize,
    /// 0 disables requirements caching.
    pub cache_capacity: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            weights: MatchWeights::default(),
            min_resume_tokens: DEFAULT_MIN_TOKENS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let weights = match WEIGHT_VARS.map(|key| var(key)) {
            [None, None, None, None] => MatchWeights::default(),
            [Some(skills), Some(experience), Some(education), Some(text)] => MatchWeights::new(
                parse_weight(WEIGHT_VARS[0], &skills)?,
                parse_weight(WEIGHT_VARS[1], &experience)?,
                parse_weight(WEIGHT_VARS[2], &education)?,
                parse_weight(WEIGHT_VARS[3], &text)?,
            )
            .context("Invalid match weight override")?,
            _ => bail!("Set all of {} or none of them", WEIGHT_VARS.join(", ")),
        };

        Ok(Config {
            vocabulary_path: var("JOBMATCH_VOCABULARY_PATH").map(PathBuf::from),
            weights,
            min_resume_tokens: var("JOBMATCH_MIN_RESUME_TOKENS")
                .map(|v| v.trim().parse::<usize>())
                .transpose()
                .context("JOBMATCH_MIN_RESUME_TOKENS must be a non-negative integer")?
                .unwrap_or(DEFAULT_MIN_TOKENS),
            cache_capacity: var("JOBMATCH_CACHE_CAPACITY")
                .map(|v| v.trim().parse::<usize>())
                .transpose()
                .context("JOBMATCH_CACHE_CAPACITY must be a non-negative integer")?
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Loads the configured vocabulary, or the built-in one.
    pub fn load_vocabulary(&self) -> Result<SkillVocabulary> {
        match &self.vocabulary_path {
            Some(path) => SkillVocabulary::from_path(path).with_context(|| {
                format!("Failed to load skill vocabulary from '{}'", path.display())
            }),
            None => SkillVocabulary::builtin().context("Built-in skill vocabulary is invalid"),
        }
    }
}

fn parse_weight(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{key} must be a number, got '{value}'"))
}
