use std::collections::BTreeSet;
use std::sync::Arc;

use crate::extraction::vocabulary::SkillVocabulary;
use crate::text::normalizer::NormalizedText;

/// Finds vocabulary skills in normalized text.
///
/// Matching is on whole tokens and contiguous token sequences, so "java"
/// never fires inside "javascript" and "machine learning" needs both words
/// adjacent. Recall is bounded by the vocabulary: nothing outside it is
/// ever reported.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
}

impl SkillExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Canonical names of every skill present in `text`.
    pub fn extract(&self, text: &NormalizedText) -> BTreeSet<String> {
        self.extract_from_tokens(&text.tokens)
    }

    pub fn extract_from_tokens(&self, tokens: &[String]) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for (start, token) in tokens.iter().enumerate() {
            for phrase in self.vocabulary.phrases_starting_with(token) {
                let end = start + phrase.tokens.len();
                if end <= tokens.len() && tokens[start..end] == phrase.tokens[..] {
                    found.insert(phrase.canonical.clone());
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::normalize;

    fn extractor(entries: Vec<(&str, Vec<&str>)>) -> SkillExtractor {
        SkillExtractor::new(Arc::new(SkillVocabulary::from_map(entries).unwrap()))
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        let ex = extractor(vec![("java", vec![]), ("javascript", vec!["js"])]);
        let found = ex.extract(&normalize("Frontend work in JavaScript and TypeScript"));
        assert_eq!(names(&found), vec!["javascript"]);
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let ex = extractor(vec![("kubernetes", vec!["k8s"]), ("node.js", vec!["nodejs"])]);
        let found = ex.extract(&normalize("Deployed NodeJS services on K8s"));
        assert_eq!(names(&found), vec!["kubernetes", "node.js"]);
    }

    #[test]
    fn test_multi_word_phrase_requires_adjacency() {
        let ex = extractor(vec![("machine learning", vec![])]);
        assert_eq!(
            names(&ex.extract(&normalize("Applied Machine-Learning? no: machine learning!"))),
            vec!["machine learning"]
        );
        assert!(ex
            .extract(&normalize("machine shop, learning fast"))
            .is_empty());
    }

    #[test]
    fn test_phrase_at_end_of_text() {
        let ex = extractor(vec![("power bi", vec![])]);
        assert_eq!(names(&ex.extract(&normalize("Dashboards in Power BI"))), vec!["power bi"]);
        assert!(ex.extract(&normalize("Dashboards in Power")).is_empty());
    }

    #[test]
    fn test_symbol_skills() {
        let ex = extractor(vec![("c++", vec!["cpp"]), ("c#", vec![]), ("c", vec![])]);
        let found = ex.extract(&normalize("Systems work in C++ and some C#"));
        assert_eq!(names(&found), vec!["c#", "c++"]);
    }

    #[test]
    fn test_case_insensitive() {
        let ex = extractor(vec![("python", vec![])]);
        assert_eq!(names(&ex.extract(&normalize("PYTHON"))), vec!["python"]);
    }

    #[test]
    fn test_never_invents_skills() {
        let ex = extractor(vec![("rust", vec![])]);
        let found = ex.extract(&normalize("Haskell, Elixir, OCaml and Rust"));
        assert!(found.iter().all(|s| ex.vocabulary().contains(s)));
        assert_eq!(names(&found), vec!["rust"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let ex = extractor(vec![("rust", vec![])]);
        assert!(ex.extract(&normalize("")).is_empty());
    }

    #[test]
    fn test_builtin_skips_everyday_words() {
        let ex = SkillExtractor::new(Arc::new(SkillVocabulary::builtin().unwrap()));
        let prose = normalize(
            "I excel at teamwork. Spring 2020 internship. Windows of opportunity; express interest.",
        );
        assert!(ex.extract(&prose).is_empty(), "{:?}", ex.extract(&prose));

        let stack = normalize("Spring Boot and Express.js services, reports in Microsoft Excel");
        let found = ex.extract(&stack);
        for skill in ["express.js", "microsoft excel", "spring boot"] {
            assert!(found.contains(skill), "missing {skill}");
        }
    }
}
