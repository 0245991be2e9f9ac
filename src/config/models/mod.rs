//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod batch;
pub mod cache;
pub mod database;
pub mod gateway;
pub mod rate_limit;
pub mod retry;
pub mod server;
pub mod upstream;

// Re-export all configuration types
pub use batch::*;
pub use cache::*;
pub use database::*;
pub use gateway::*;
pub use rate_limit::*;
pub use retry::*;
pub use server::*;
pub use upstream::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum retry attempts for a single upstream call
pub fn default_max_retries() -> u32 {
    3
}

/// Default base backoff delay in milliseconds
pub fn default_base_delay_ms() -> u64 {
    1000
}

/// Default maximum additive jitter in milliseconds
pub fn default_max_jitter_ms() -> u64 {
    200
}

/// Default per-user requests per minute against one upstream family
pub fn default_per_user_rpm() -> u32 {
    60
}

/// Default maximum time to wait for a rate-limit slot, in milliseconds
pub fn default_max_wait_ms() -> u64 {
    10_000
}

/// Default maximum number of items in one batch
pub fn default_batch_max_items() -> usize {
    100
}

/// Default maximum number of concurrently in-flight items per batch
pub fn default_batch_max_concurrency() -> usize {
    8
}

/// Default read-view cache TTL in seconds
pub fn default_cache_ttl() -> u64 {
    300
}

/// Default maximum read-view cache entries
pub fn default_cache_max_entries() -> usize {
    1000
}

/// Default database connection pool size
pub fn default_max_connections() -> u32 {
    10
}

/// Default database connect timeout in seconds
pub fn default_connection_timeout() -> u64 {
    10
}
