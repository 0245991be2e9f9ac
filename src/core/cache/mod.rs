//! Cached upstream read views
//!
//! The dashboard's list views are served from this cache; the batch
//! orchestrator invalidates the affected view after any batch with at least
//! one success, so the next render refetches.

pub mod invalidator;
pub mod types;
pub mod view_cache;

pub use invalidator::CacheInvalidator;
pub use types::{CacheStats, ViewCacheStats};
pub use view_cache::ViewCache;

use crate::core::catalog::{Platform, ResourceType};
use uuid::Uuid;

/// Deterministic cache key for one user's view of one resource type
pub fn view_key(platform: Platform, resource_type: ResourceType, user_id: Uuid) -> String {
    format!(
        "{}:{}:userId:{}",
        platform.as_str(),
        resource_type.as_str(),
        user_id
    )
}
