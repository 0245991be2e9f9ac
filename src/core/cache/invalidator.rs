//! Cache invalidation after successful batches

use super::view_cache::ViewCache;
use std::sync::Arc;
use tracing::info;

/// Clears cached read views for the resource type a batch touched
///
/// Fired by the orchestrator only when at least one item succeeded; a fully
/// failed or quota-rejected batch leaves the cache untouched.
#[derive(Clone)]
pub struct CacheInvalidator {
    cache: Arc<ViewCache>,
}

impl CacheInvalidator {
    /// Create a new invalidator over the shared view cache
    pub fn new(cache: Arc<ViewCache>) -> Self {
        Self { cache }
    }

    /// Delete the named cache entries
    pub fn invalidate(&self, keys: &[String]) {
        let mut removed = 0usize;
        for key in keys {
            if self.cache.invalidate(key) {
                removed += 1;
            }
        }
        info!(requested = keys.len(), removed, "invalidated read views");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewCacheConfig;
    use serde_json::json;

    #[test]
    fn test_invalidate_named_keys_only() {
        let cache = Arc::new(ViewCache::new(ViewCacheConfig::default()));
        cache.put("keep".to_string(), json!(1));
        cache.put("drop".to_string(), json!(2));

        let invalidator = CacheInvalidator::new(cache.clone());
        invalidator.invalidate(&["drop".to_string()]);

        assert!(cache.get("keep").is_some());
        assert!(cache.get("drop").is_none());
    }
}
