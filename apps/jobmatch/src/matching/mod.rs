// Scoring, explanation and ranking.
// Factor functions are pure; the pipeline owns the only shared state (cache).

pub mod explanation;
pub mod pipeline;
pub mod scorer;
pub mod similarity;
pub mod weights;

pub use explanation::{Explanation, ExplanationGenerator};
pub use pipeline::{MatchBatch, MatchReport, MatchingPipeline, PipelineSettings, PostingFailure};
pub use scorer::{FitScorer, ScoreBreakdown, WeightedFitScorer};
pub use similarity::cosine_similarity;
pub use weights::MatchWeights;
