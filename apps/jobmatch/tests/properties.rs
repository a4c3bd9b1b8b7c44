//! Property-based tests using proptest

use std::collections::BTreeSet;

use jobmatch::matching::scorer::skills_score;
use jobmatch::text::normalize;
use jobmatch::{MatchWeights, SectionExtractor, SkillExtractor, SkillVocabulary, SubScores};
use proptest::prelude::*;

/// Everyday words and initials that sit close to degree markers but never
/// form one: no field names, no "degree", no "in".
const PROSE_WORDS: &[&str] = &[
    "i'm", "a", "scrum", "master", "master's", "masters", "of", "none", "ms", "ma", "ba",
    "bs", "office", "team's", "deputy", "jack", "all", "trades", "plan", "b", "m", "s",
    "built", "python", "services", "with", "the", "for", "users",
];

fn builtin() -> SkillVocabulary {
    SkillVocabulary::builtin().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_extracted_skills_are_vocabulary_names(text in "[a-zA-Z0-9 .,+#/\n-]{0,400}") {
        let vocab = std::sync::Arc::new(builtin());
        let extractor = SkillExtractor::new(vocab.clone());
        let found = extractor.extract(&normalize(&text));
        for skill in &found {
            prop_assert!(vocab.contains(skill), "{} is not canonical", skill);
        }
    }

    #[test]
    fn test_vocabulary_words_are_found(picks in proptest::sample::subsequence(
        vec!["python", "docker", "kubernetes", "postgresql", "tableau", "rust"], 0..6
    )) {
        let vocab = std::sync::Arc::new(builtin());
        let extractor = SkillExtractor::new(vocab);
        let text = format!("Worked with {} daily.", picks.join(", "));
        let found = extractor.extract(&normalize(&text));
        let expected: BTreeSet<String> = picks.iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn test_composite_within_bounds(
        skills in 0.0f64..=100.0,
        experience in 0.0f64..=100.0,
        education in 0.0f64..=100.0,
        text in 0.0f64..=100.0,
        raw in proptest::array::uniform4(0.0f64..1.0),
    ) {
        let total: f64 = raw.iter().sum();
        prop_assume!(total > 1e-3);
        let [a, b, c, _] = raw.map(|w| w / total);
        // derive the last weight so the sum is exactly 1.0 within tolerance
        let d = (1.0 - a - b - c).max(0.0);
        let Ok(weights) = MatchWeights::new(a, b, c, d) else {
            return Ok(());
        };
        let score = weights.composite(&SubScores::new(skills, experience, education, text));
        prop_assert!((0.0..=100.0).contains(&score), "composite {}", score);
    }

    #[test]
    fn test_skills_score_monotonic(required in 1usize..40, matched in 0usize..40) {
        let matched = matched.min(required);
        let lower = skills_score(matched, required);
        let higher = skills_score((matched + 1).min(required), required);
        prop_assert!(higher >= lower);
        prop_assert!((0.0..=100.0).contains(&lower));
    }

    #[test]
    fn test_no_required_skills_scores_full(matched in 0usize..10) {
        prop_assert_eq!(skills_score(matched, 0), 100.0);
    }

    #[test]
    fn test_normalize_is_deterministic(text in "\\PC{0,200}") {
        prop_assert_eq!(normalize(&text), normalize(&text));
    }

    #[test]
    fn test_prose_without_degree_keywords_is_unspecified(
        words in proptest::collection::vec(proptest::sample::select(PROSE_WORDS), 0..30),
        separator in proptest::sample::select(&[" ", ", ", ". ", "; "][..]),
    ) {
        let text = words.join(separator);
        let level = SectionExtractor::new(2024).education_level(&normalize(&text));
        prop_assert_eq!(level, None, "text: {}", text);
    }
}
