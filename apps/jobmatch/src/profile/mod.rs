// Resume side: raw decoded text in, immutable CandidateProfile out.

pub mod builder;
pub mod quality;

pub use builder::ProfileBuilder;
pub use quality::{QualityAssessor, QualityCheck, QualityReport};
