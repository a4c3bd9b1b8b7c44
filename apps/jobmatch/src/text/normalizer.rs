//! Text normalization shared by every extractor.
//!
//! A resume or posting is normalized exactly once. The result keeps two views:
//! the cleaned lowercase text (punctuation intact, needed for contact patterns)
//! and the token sequence used by skill, section and similarity logic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::stopwords::is_stop_word;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<>]{0,200}>").expect("markup tag pattern is valid"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `2015 - 2020`, `2018 to present`, `2018 - mar 2021` and `2018 - 03/2021`
/// collapse to one hyphenated token. Runs on lowercased text.
static SPACED_YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:19|20)\d{2})\s*(?:-|to|until|through)\s*(?:[a-z]{3,9}\.?\s+|\d{1,2}/)?((?:19|20)\d{2}|present|current|now|today)\b",
    )
    .expect("year range pattern is valid")
});

const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Normalized view of a piece of raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Lowercased, markup-free, whitespace-collapsed text with punctuation kept.
    pub cleaned: String,
    /// Lowercased tokens with noise punctuation removed.
    pub tokens: Vec<String>,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Space-joined token stream. Tokens never contain whitespace, so this
    /// round-trips through `split_whitespace`.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Tokens with stop words, single characters and bare numbers removed.
    pub fn content_tokens(&self) -> Vec<&str> {
        content_tokens(self.tokens.iter().map(String::as_str))
    }
}

/// Normalizes raw text into its cleaned form and token sequence.
pub fn normalize(raw: &str) -> NormalizedText {
    let cleaned = clean(raw);
    let tokens = tokenize(&cleaned);
    NormalizedText { cleaned, tokens }
}

/// Strips markup and entities, folds dashes, lowercases, joins spaced year
/// ranges and collapses whitespace.
pub fn clean(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let without_tags = MARKUP_TAG.replace_all(raw, " ");
    let mut text = without_tags.into_owned();
    for (entity, replacement) in HTML_ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            _ => c,
        })
        .collect::<String>()
        .to_lowercase();

    let ranges_joined = SPACED_YEAR_RANGE.replace_all(&folded, "$1-$2");
    WHITESPACE
        .replace_all(&ranges_joined, " ")
        .trim()
        .to_string()
}

/// Splits cleaned text into tokens.
///
/// Punctuation separates tokens, except a hyphen between two alphanumerics
/// (`full-stack`, `2015-2020`) and trailing `+`/`#` on a token that starts
/// with a letter (`c++`, `c#`).
pub fn tokenize(cleaned: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = cleaned.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
            continue;
        }

        let keep = match c {
            '-' => {
                !current.is_empty()
                    && !current.ends_with('-')
                    && chars.peek().is_some_and(|next| next.is_alphanumeric())
            }
            '+' | '#' => current
                .chars()
                .next()
                .is_some_and(|first| first.is_alphabetic()),
            _ => false,
        };

        if keep {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

pub(crate) fn content_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    tokens
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| t.chars().any(char::is_alphabetic))
        .filter(|t| !is_stop_word(t))
        .collect()
}
