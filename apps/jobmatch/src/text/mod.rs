// Text utilities shared by resume and posting processing.
// Everything here is pure: same input, same output.

pub mod keywords;
pub mod normalizer;
pub mod stopwords;

pub use keywords::top_keywords;
pub use normalizer::{normalize, NormalizedText};
