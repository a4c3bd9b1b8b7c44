//! Resume profile extraction and explainable job matching.
//!
//! Decoded resume text becomes a [`CandidateProfile`]; job postings become
//! cached [`JobRequirements`]; the [`MatchingPipeline`] scores one against
//! the other on four weighted factors and ranks the postings with a
//! human-readable explanation for each.
//!
//! ```no_run
//! use jobmatch::{Config, JobPosting, MatchingPipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! jobmatch::telemetry::init_tracing(&config.rust_log);
//! let pipeline = MatchingPipeline::from_config(&config)?;
//!
//! let postings = vec![JobPosting::new("job-1", "Data Engineer", "Python, SQL, 3+ years")];
//! let report = pipeline.match_resume("resume.pdf", "Python developer ...", &postings);
//! for result in &report.batch.results {
//!     println!("{} {:.1}", result.posting_id, result.composite_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod extraction;
pub mod jobs;
pub mod matching;
pub mod models;
pub mod profile;
pub mod telemetry;
pub mod text;

pub use config::Config;
pub use errors::{MatchError, Result};
pub use extraction::{SectionExtractor, SkillExtractor, SkillVocabulary};
pub use jobs::{JobFeatureExtractor, RequirementsCache};
pub use matching::{
    ExplanationGenerator, FitScorer, MatchBatch, MatchReport, MatchWeights, MatchingPipeline,
    PipelineSettings, PostingFailure, WeightedFitScorer,
};
pub use models::{
    CandidateProfile, ContactInfo, EducationLevel, JobPosting, JobRequirements, MatchBand,
    MatchResult, SubScores,
};
pub use profile::{ProfileBuilder, QualityAssessor};
