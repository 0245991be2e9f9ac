//! Rate limiter types and data structures

use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Answer to one reservation attempt
#[derive(Debug, Clone, Copy)]
pub struct Reservation {
    /// Whether a token was consumed
    pub granted: bool,
    /// Time until the next token becomes available, zero when granted
    pub wait: Duration,
}

/// The caller's wait budget ran out before a token became available
#[derive(Debug, Clone, Error)]
#[error("rate limit slot not granted within {max_wait:?} for user {user_id}")]
pub struct RateLimitExceeded {
    /// User whose bucket stayed empty
    pub user_id: Uuid,
    /// Wait budget that was exhausted
    pub max_wait: Duration,
}

/// One token bucket
#[derive(Debug, Clone)]
pub(super) struct Bucket {
    /// Current token count
    pub(super) tokens: f64,
    /// Last refill time
    pub(super) last_refill: Instant,
}

impl Bucket {
    pub(super) fn full(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_refill: Instant::now(),
        }
    }
}
