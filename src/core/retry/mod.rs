//! Bounded exponential-backoff retry for single upstream calls
//!
//! Only rate-limited errors are retried; everything else propagates on the
//! first attempt. The scheduler inspects the typed error kind returned by
//! the upstream seam, so there is no exception-driven control flow. This is
//! a per-call retry nested inside the rate-limiter check, never a
//! batch-level retry.

use crate::config::RetryConfig;
use crate::core::upstream::UpstreamError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Wraps one upstream call with bounded backoff retry
#[derive(Debug, Clone)]
pub struct RetryScheduler {
    config: RetryConfig,
}

impl RetryScheduler {
    /// Create a new scheduler
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Deterministic backoff for the given zero-based attempt, without jitter
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.base_delay_ms.saturating_mul(1u64 << attempt.min(16)))
    }

    /// Additive full jitter
    fn jitter(&self) -> Duration {
        if self.config.max_jitter_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=self.config.max_jitter_ms))
    }

    /// Run the operation, retrying rate-limited failures up to the cap
    ///
    /// After the cap, a rate-limited failure surfaces as
    /// [`UpstreamError::RateLimitExhausted`]; the aggregator classifies it
    /// as a generic failure, distinct from the subscription-tier quota
    /// rejection.
    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, UpstreamError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut attempt = 0u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => {
                    if attempt >= self.config.max_retries {
                        return Err(UpstreamError::RateLimitExhausted {
                            attempts: attempt + 1,
                            message: err.to_string(),
                        });
                    }
                    let delay = self.backoff_delay(attempt) + self.jitter();
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "upstream rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
