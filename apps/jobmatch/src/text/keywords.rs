//! Keyword inventory: the most frequent content words of a document.

use std::collections::HashMap;

use crate::text::normalizer::NormalizedText;

/// Default number of keywords kept on a profile.
pub const DEFAULT_KEYWORD_LIMIT: usize = 20;

/// Returns up to `limit` content tokens of at least three characters, most
/// frequent first, ties broken alphabetically.
pub fn top_keywords(text: &NormalizedText, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in text.content_tokens() {
        if token.chars().count() >= 3 {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(token, _)| token.to_string())
        .collect()
}
