//! View cache implementation

use super::types::{CacheEntry, CacheStats, ViewCacheStats};
use crate::config::ViewCacheConfig;
use dashmap::DashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TTL cache for upstream list views, keyed by the deterministic view key
pub struct ViewCache {
    entries: DashMap<String, CacheEntry<serde_json::Value>>,
    config: ViewCacheConfig,
    stats: Arc<ViewCacheStats>,
}

impl ViewCache {
    /// Create a new view cache
    pub fn new(config: ViewCacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: Arc::new(ViewCacheStats::default()),
        }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl)
    }

    /// Get a cached view, dropping it if expired
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        if !self.config.enabled {
            return None;
        }

        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "view cache hit");
                return Some(entry.value.clone());
            }
            drop(entry);
            self.entries.remove(key);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a view
    pub fn put(&self, key: String, value: serde_json::Value) {
        if !self.config.enabled {
            return;
        }

        if self.entries.len() >= self.config.max_entries {
            self.cleanup_expired();
            // Still at capacity with live entries: refuse rather than grow
            if self.entries.len() >= self.config.max_entries {
                debug!(key, "view cache at capacity, skipping insert");
                return;
            }
        }

        self.entries.insert(key, CacheEntry::new(value, self.ttl()));
    }

    /// Delete one entry; returns whether it existed
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
            debug!(key, "view cache entry invalidated");
        }
        removed
    }

    /// Drop all expired entries
    fn cleanup_expired(&self) {
        let mut removed = 0u64;
        self.entries.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
            debug!(removed, "cleaned up expired view cache entries");
        }
    }

    /// Get cache statistics (lock-free snapshot)
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
