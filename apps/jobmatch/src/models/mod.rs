pub mod education;
pub mod matching;
pub mod posting;
pub mod profile;

pub use education::EducationLevel;
pub use matching::{MatchBand, MatchResult, SubScores};
pub use posting::{JobPosting, JobRequirements};
pub use profile::{CandidateProfile, ContactInfo};
