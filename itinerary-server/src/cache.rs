//! Caching layer for routing backend responses.
//!
//! Path search on the routing backend is slow, and a user flicking between
//! alternatives of one query would otherwise trigger a search per click. We
//! cache the raw alternatives keyed by the validated query; reconstruction
//! runs afresh on every selection. Shortest paths do not depend on the
//! clock and are keyed by their station pair alone.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::backend::{Backend, BackendError};
use crate::domain::{AlternativePath, ClassicPath, ItineraryQuery};

/// Cached alternatives for one query.
type AlternativesEntry = Arc<Vec<AlternativePath>>;

/// Cache key for shortest paths: (start, end) as requested.
type ShortestPathKey = (String, String);

/// Cached shortest path for one station pair.
type ShortestPathEntry = Arc<ClassicPath>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries, per kind of response.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of routing backend responses.
pub struct RoutingCache {
    /// Alternatives, keyed by the validated query.
    alternatives: MokaCache<ItineraryQuery, AlternativesEntry>,

    /// Shortest paths, keyed by station pair.
    shortest_paths: MokaCache<ShortestPathKey, ShortestPathEntry>,
}

impl RoutingCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let alternatives = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let shortest_paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            alternatives,
            shortest_paths,
        }
    }

    /// Get cached alternatives.
    pub async fn get_alternatives(&self, query: &ItineraryQuery) -> Option<AlternativesEntry> {
        self.alternatives.get(query).await
    }

    /// Insert alternatives into the cache.
    pub async fn insert_alternatives(&self, query: ItineraryQuery, entry: AlternativesEntry) {
        self.alternatives.insert(query, entry).await;
    }

    /// Get a cached shortest path.
    pub async fn get_shortest_path(&self, key: &ShortestPathKey) -> Option<ShortestPathEntry> {
        self.shortest_paths.get(key).await
    }

    /// Insert a shortest path into the cache.
    pub async fn insert_shortest_path(&self, key: ShortestPathKey, entry: ShortestPathEntry) {
        self.shortest_paths.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.alternatives.entry_count() + self.shortest_paths.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.alternatives.invalidate_all();
        self.shortest_paths.invalidate_all();
    }
}

/// Routing backend with caching.
///
/// Wraps a [`Backend`] and caches successful responses. Errors are never
/// cached, so a closed network is asked again on the next request.
pub struct CachedBackend {
    backend: Backend,
    cache: RoutingCache,
}

impl CachedBackend {
    /// Create a new cached backend.
    pub fn new(backend: Backend, cache_config: &CacheConfig) -> Self {
        Self {
            backend,
            cache: RoutingCache::new(cache_config),
        }
    }

    /// Get alternatives for a query, using the cache if available.
    pub async fn get_alternatives(
        &self,
        query: &ItineraryQuery,
    ) -> Result<AlternativesEntry, BackendError> {
        if let Some(cached) = self.cache.get_alternatives(query).await {
            debug!(paths = cached.len(), "Alternatives cache hit");
            return Ok(cached);
        }

        let paths = self.backend.get_alternatives(query).await?;
        let entry = Arc::new(paths);

        self.cache
            .insert_alternatives(query.clone(), entry.clone())
            .await;

        Ok(entry)
    }

    /// Get the shortest path between two stations, using the cache if
    /// available.
    pub async fn get_shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<ShortestPathEntry, BackendError> {
        let key = (start.to_string(), end.to_string());

        if let Some(cached) = self.cache.get_shortest_path(&key).await {
            debug!(start, end, "Shortest path cache hit");
            return Ok(cached);
        }

        let path = self.backend.get_shortest_path(start, end).await?;
        let entry = Arc::new(path);

        self.cache.insert_shortest_path(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying backend for operations that bypass cache.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
