// Posting side: raw posting records in, cached JobRequirements out.

pub mod cache;
pub mod features;

pub use cache::{
    cache_with_capacity, CacheStats, InMemoryCache, LruRequirementsCache, NoCache,
    RequirementsCache,
};
pub use features::{content_hash, JobFeatureExtractor};
