//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchOrchestrator;
use crate::core::cache::ViewCache;
use crate::core::quota::QuotaStore;
use crate::core::rate_limiter::RateLimiter;
use crate::core::upstream::UpstreamApi;
use crate::storage::Database;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are shared handles; cloning the state clones handles, never
/// the underlying resources.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Quota store
    pub quota: Arc<dyn QuotaStore>,
    /// Per-(user, platform) rate limiter
    pub rate_limiter: RateLimiter,
    /// Cached upstream read views
    pub view_cache: Arc<ViewCache>,
    /// Upstream API client
    pub upstream: Arc<dyn UpstreamApi>,
    /// Batch orchestration pipeline
    pub orchestrator: BatchOrchestrator,
    /// Relational store, absent when the database is disabled
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
