//! Token-bucket rate limiter implementation

use super::types::{Bucket, RateLimitExceeded, Reservation};
use crate::config::RateLimitConfig;
use crate::core::catalog::Platform;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

type BucketKey = (Uuid, Platform);

/// Per-(user, platform) token-bucket rate limiter
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<RwLock<HashMap<BucketKey, Bucket>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn tokens_per_second(&self) -> f64 {
        f64::from(self.config.per_user_rpm) / 60.0
    }

    /// Atomically consume a token if one is available
    ///
    /// Refill is computed from elapsed time under the same lock that
    /// consumes the token, so concurrent callers never double-spend.
    pub async fn try_reserve(&self, user_id: Uuid, platform: Platform) -> Reservation {
        if !self.config.enabled {
            return Reservation {
                granted: true,
                wait: Duration::ZERO,
            };
        }

        let capacity = f64::from(self.config.per_user_rpm);
        let rate = self.tokens_per_second();
        let now = Instant::now();

        let mut buckets = self.buckets.write().await;
        let bucket = buckets
            .entry((user_id, platform))
            .or_insert_with(|| Bucket::full(capacity));

        // Refill tokens based on elapsed time
        let elapsed = now.duration_since(bucket.last_refill);
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * rate).min(capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Reservation {
                granted: true,
                wait: Duration::ZERO,
            }
        } else {
            let wait = Duration::from_secs_f64((1.0 - bucket.tokens) / rate);
            debug!(
                user = %user_id,
                platform = %platform,
                wait_ms = wait.as_millis() as u64,
                "rate limit slot unavailable"
            );
            Reservation {
                granted: false,
                wait,
            }
        }
    }

    /// Reserve a slot, sleeping between attempts, bounded by the configured
    /// wait budget
    pub async fn acquire(
        &self,
        user_id: Uuid,
        platform: Platform,
    ) -> Result<(), RateLimitExceeded> {
        let max_wait = Duration::from_millis(self.config.max_wait_ms);
        let deadline = Instant::now() + max_wait;

        loop {
            let reservation = self.try_reserve(user_id, platform).await;
            if reservation.granted {
                return Ok(());
            }
            if Instant::now() + reservation.wait > deadline {
                return Err(RateLimitExceeded { user_id, max_wait });
            }
            tokio::time::sleep(reservation.wait).await;
        }
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            buckets: self.buckets.clone(),
        }
    }
}
