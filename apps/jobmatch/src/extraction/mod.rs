// Deterministic, vocabulary- and pattern-based extraction.
// No NLP model: recall is bounded by the vocabulary and phrase tables.

pub mod contact;
pub mod sections;
pub mod skills;
pub mod vocabulary;

pub use contact::extract_contact_info;
pub use sections::{ExperienceSource, SectionExtractor, SectionSignals};
pub use skills::SkillExtractor;
pub use vocabulary::SkillVocabulary;
