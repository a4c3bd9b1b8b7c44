use std::collections::HashSet;

use once_cell::sync::Lazy;

/// English stop words dropped by similarity and keyword inventory.
/// Skill matching never consults this list.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
        "been", "being", "best", "both", "but", "by", "can", "could", "day", "did", "do", "does",
        "each", "etc", "few", "first", "for", "from", "get", "good", "great", "had", "has", "have",
        "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "let", "may",
        "me", "might", "more", "most", "must", "my", "new", "no", "not", "now", "of", "old", "on",
        "one", "only", "or", "other", "our", "out", "over", "own", "put", "same", "say", "second",
        "see", "she", "should", "so", "some", "such", "than", "that", "the", "their", "them",
        "then", "there", "these", "they", "this", "those", "three", "to", "too", "two", "up", "us",
        "use", "very", "was", "way", "we", "were", "what", "when", "where", "which", "who", "why",
        "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
    }

    #[test]
    fn test_skill_tokens_are_not_stop_words() {
        for token in ["python", "rust", "sql", "go", "built", "team"] {
            assert!(!is_stop_word(token), "{token} should not be a stop word");
        }
    }
}
