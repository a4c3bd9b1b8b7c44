//! Bag-of-tokens cosine similarity, the low-weight fallback signal.

use std::collections::BTreeMap;

use crate::text::normalizer::content_tokens;

// Ordered maps keep float summation order fixed, so equal inputs give
// bit-identical scores.
fn term_frequencies<'a>(tokens: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, f64> {
    let mut counts = BTreeMap::new();
    for token in content_tokens(tokens) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine of the stop-word-filtered term-frequency vectors, in [0, 1].
/// Returns 0 when either side has no content tokens.
pub fn cosine_similarity<'a, 'b>(
    left: impl Iterator<Item = &'a str>,
    right: impl Iterator<Item = &'b str>,
) -> f64 {
    let left = term_frequencies(left);
    let right = term_frequencies(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    // iterate the smaller map for the dot product
    let (small, large) = if left.len() <= right.len() {
        (&left, &right)
    } else {
        (&right, &left)
    };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, a)| large.get(term).map(|b| a * b))
        .sum();

    let norm = |v: &BTreeMap<&str, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
    let denominator = norm(&left) * norm(&right);
    if denominator == 0.0 {
        return 0.0;
    }
    (dot / denominator).clamp(0.0, 1.0)
}

/// Cosine similarity scaled to [0, 100].
pub fn text_similarity_score<'a, 'b>(
    left: impl Iterator<Item = &'a str>,
    right: impl Iterator<Item = &'b str>,
) -> f64 {
    cosine_similarity(left, right) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> impl Iterator<Item = &str> {
        s.split_whitespace()
    }

    #[test]
    fn test_identical_text_is_one() {
        let sim = cosine_similarity(words("rust kafka rust"), words("rust kafka rust"));
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_text_is_zero() {
        assert_eq!(cosine_similarity(words("rust kafka"), words("pottery glaze")), 0.0);
    }

    #[test]
    fn test_stop_words_ignored() {
        assert_eq!(cosine_similarity(words("the and with"), words("the and with")), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // [1,1,0]·[1,0,1] / (√2·√2) = 0.5
        let sim = cosine_similarity(words("rust kafka"), words("rust spark"));
        assert!((sim - 0.5).abs() < 1e-9, "sim was {sim}");
        let score = text_similarity_score(words("rust kafka"), words("rust spark"));
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let a = "python sql airflow python";
        let b = "sql python dbt";
        let ab = cosine_similarity(words(a), words(b));
        let ba = cosine_similarity(words(b), words(a));
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_empty_side_is_zero() {
        assert_eq!(cosine_similarity(words(""), words("rust")), 0.0);
    }
}
