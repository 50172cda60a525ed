//! Caching layer for resolution results.
//!
//! Resolution is pure over a snapshot, so a result can be reused until the
//! snapshot changes. Keys carry the snapshot generation; entries for an old
//! generation are never looked up again and age out by TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::normalize;
use crate::planner::ResolutionResult;

/// What was asked, with normalized strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Pair { start: String, end: String },
    Text(String),
}

impl QueryKey {
    pub fn pair(start: &str, end: &str) -> Self {
        Self::Pair {
            start: normalize(start),
            end: normalize(end),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::Text(normalize(text))
    }
}

/// Cache key: (snapshot generation, query).
type CacheKey = (u64, QueryKey);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Cache for resolution results.
#[derive(Clone)]
pub struct ResolutionCache {
    results: MokaCache<CacheKey, Arc<ResolutionResult>>,
}

impl ResolutionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    pub async fn get(&self, generation: u64, key: &QueryKey) -> Option<Arc<ResolutionResult>> {
        self.results.get(&(generation, key.clone())).await
    }

    pub async fn insert(&self, generation: u64, key: QueryKey, result: Arc<ResolutionResult>) {
        self.results.insert((generation, key), result).await;
    }

    /// Return the cached result, or compute and cache it.
    pub async fn get_or_resolve(
        &self,
        generation: u64,
        key: QueryKey,
        resolve: impl FnOnce() -> ResolutionResult,
    ) -> Arc<ResolutionResult> {
        if let Some(cached) = self.get(generation, &key).await {
            return cached;
        }

        let result = Arc::new(resolve());
        self.insert(generation, key, result.clone()).await;
        result
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}
