//! LRU cache for assembled search results.
//!
//! Entries are keyed by the normalized query, the filters and the canonical
//! JSON of every candidate, so any change to a candidate that could change
//! the result produces a different key. The LRU map compares whole keys, so
//! two searches never share an entry by hash alone.
//!
//! All cache operations are non-blocking (try-lock pattern): a contended
//! cache behaves like a miss and the caller computes the result itself.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::core::Entity;
use crate::error::Result;

use super::filters::SearchFilters;
use super::result::SearchResult;

/// Default cache size for query results (number of queries)
pub const DEFAULT_QUERY_CACHE_SIZE: usize = 128;

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = self.hits as f64 / total as f64;
            rate
        }
    }
}

/// Cache key for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    query: String,
    filters: String,
    candidates: String,
}

impl QueryKey {
    /// Derive the key from the normalized query text, filters and snapshot.
    /// Filters carry floats, so they are keyed by their JSON form as well.
    pub fn new(
        normalized_query: &str,
        filters: Option<&SearchFilters>,
        candidates: &[Entity],
    ) -> Result<Self> {
        let filters = match filters {
            Some(filters) => serde_json::to_string(filters)?,
            None => String::new(),
        };
        Ok(Self {
            query: normalized_query.to_string(),
            filters,
            candidates: serde_json::to_string(candidates)?,
        })
    }
}

/// Thread-safe LRU cache of search results.
pub struct QueryCache {
    entries: Mutex<LruCache<QueryKey, SearchResult>>,
    stats: Mutex<CacheStats>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_CACHE_SIZE)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl QueryCache {
    /// Create a cache holding up to `size` results (minimum 1).
    #[must_use]
    pub fn new(size: usize) -> Self {
        let capacity = NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Get a cached result.
    ///
    /// Returns None if not cached or cache is locked.
    pub fn get(&self, key: &QueryKey) -> Option<SearchResult> {
        let mut entries = self.entries.try_lock().ok()?;
        let mut stats = self.stats.try_lock().ok()?;

        if let Some(result) = entries.get(key) {
            stats.hits += 1;
            Some(result.clone())
        } else {
            stats.misses += 1;
            None
        }
    }

    /// Cache a result.
    ///
    /// Silently skipped if cache is locked.
    pub fn put(&self, key: QueryKey, result: SearchResult) {
        if let Ok(mut entries) = self.entries.try_lock() {
            entries.put(key, result);
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.try_lock().map(|s| *s).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.try_lock().map(|c| c.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and reset statistics.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.try_lock() {
            entries.clear();
        }
        if let Ok(mut stats) = self.stats.try_lock() {
            *stats = CacheStats::default();
        }
    }
}
