//! Requirements cache, keyed by posting id and validated by content hash.
//!
//! Entries are immutable `Arc<JobRequirements>` values. Writers compute a new
//! value first and then swap it in under the lock, so a reader sees either the
//! previous entry or the new one, never a partial write.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::errors::{MatchError, Result};
use crate::models::posting::JobRequirements;

/// Cache statistics for monitoring and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Lookups that found the posting id under a different content hash.
    pub stale: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Pluggable store for derived posting requirements.
///
/// Swap implementations (unbounded, LRU, none) without touching extraction
/// or scoring code.
pub trait RequirementsCache: Send + Sync {
    /// Returns the entry for `posting_id` only if it was derived from content
    /// with the same `content_hash`.
    fn get(&self, posting_id: &str, content_hash: &str) -> Option<Arc<JobRequirements>>;

    /// Publishes an entry, replacing whatever was stored for its posting id.
    fn put(&self, requirements: Arc<JobRequirements>);

    /// Drops the entry for `posting_id`. Returns whether one existed.
    fn invalidate(&self, posting_id: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Default)]
struct StatsCounter {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
}

impl StatsCounter {
    fn record(&self, found: Option<&Arc<JobRequirements>>, content_hash: &str) -> bool {
        match found {
            Some(entry) if entry.content_hash == content_hash => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                true
            }
            Some(_) => {
                self.stale.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                false
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryCache: unbounded
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Arc<JobRequirements>>>,
    stats: StatsCounter,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequirementsCache for InMemoryCache {
    fn get(&self, posting_id: &str, content_hash: &str) -> Option<Arc<JobRequirements>> {
        let entries = self.entries.read();
        let found = entries.get(posting_id);
        self.stats
            .record(found, content_hash)
            .then(|| found.cloned())
            .flatten()
    }

    fn put(&self, requirements: Arc<JobRequirements>) {
        self.entries
            .write()
            .insert(requirements.posting_id.clone(), requirements);
    }

    fn invalidate(&self, posting_id: &str) -> bool {
        self.entries.write().remove(posting_id).is_some()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LruRequirementsCache: bounded, least-recently-used eviction
// ────────────────────────────────────────────────────────────────────────────

pub struct LruRequirementsCache {
    entries: Mutex<LruCache<String, Arc<JobRequirements>>>,
    stats: StatsCounter,
}

impl LruRequirementsCache {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            MatchError::configuration("LRU requirements cache capacity must be at least 1")
        })?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: StatsCounter::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl RequirementsCache for LruRequirementsCache {
    fn get(&self, posting_id: &str, content_hash: &str) -> Option<Arc<JobRequirements>> {
        let mut entries = self.entries.lock();
        let found = entries.get(posting_id);
        self.stats
            .record(found, content_hash)
            .then(|| found.cloned())
            .flatten()
    }

    fn put(&self, requirements: Arc<JobRequirements>) {
        self.entries
            .lock()
            .put(requirements.posting_id.clone(), requirements);
    }

    fn invalidate(&self, posting_id: &str) -> bool {
        self.entries.lock().pop(posting_id).is_some()
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// NoCache: always recompute
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct NoCache {
    stats: StatsCounter,
}

impl RequirementsCache for NoCache {
    fn get(&self, _posting_id: &str, content_hash: &str) -> Option<Arc<JobRequirements>> {
        self.stats.record(None, content_hash);
        None
    }

    fn put(&self, _requirements: Arc<JobRequirements>) {}

    fn invalidate(&self, _posting_id: &str) -> bool {
        false
    }

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

/// Capacity 0 disables caching; anything else gets a bounded LRU.
pub fn cache_with_capacity(capacity: usize) -> Result<Arc<dyn RequirementsCache>> {
    if capacity == 0 {
        Ok(Arc::new(NoCache::default()))
    } else {
        Ok(Arc::new(LruRequirementsCache::new(capacity)?))
    }
}
