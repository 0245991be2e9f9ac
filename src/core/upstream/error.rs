//! Typed upstream call errors
//!
//! Every upstream failure is carried as a value and inspected by kind; the
//! retry scheduler and the result aggregator branch on these inspectors
//! rather than on caught exceptions or raw status codes.

use thiserror::Error;

/// Error produced by a single upstream call
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Upstream returned 429; retryable with backoff
    #[error("Upstream rate limit hit: {message}")]
    RateLimited {
        message: String,
        /// Retry-After header value in seconds, when present
        retry_after: Option<u64>,
    },

    /// Retries on a rate-limited call were exhausted
    #[error("Upstream rate limit persisted after {attempts} attempts: {message}")]
    RateLimitExhausted { attempts: u32, message: String },

    /// Upstream returned 404
    #[error("Upstream resource not found: {message}")]
    NotFound { message: String },

    /// Upstream returned 403 without a quota message
    #[error("Upstream permission denied: {message}")]
    PermissionDenied { message: String },

    /// Upstream returned 403 with a quota message (platform-imposed quota,
    /// distinct from the subscription-tier quota)
    #[error("Upstream quota exhausted: {message}")]
    UpstreamQuota { message: String },

    /// Any other non-2xx status
    #[error("Upstream API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure before a status was received
    #[error("Upstream network error: {message}")]
    Network { message: String },
}

impl UpstreamError {
    /// Classify a non-2xx status and response body into an error value
    pub fn from_status(status: u16, message: String, retry_after: Option<u64>) -> Self {
        match status {
            404 => Self::NotFound { message },
            403 => {
                let lowered = message.to_lowercase();
                if lowered.contains("quota") || lowered.contains("limit") {
                    Self::UpstreamQuota { message }
                } else {
                    Self::PermissionDenied { message }
                }
            }
            429 => Self::RateLimited {
                message,
                retry_after,
            },
            _ => Self::Api { status, message },
        }
    }

    /// Whether this error should be retried with backoff
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Whether this error classifies as the not-found / permission-denied bucket
    pub fn is_not_found_or_denied(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PermissionDenied { .. })
    }

    /// Whether this error is a platform-imposed quota rejection
    pub fn is_upstream_quota(&self) -> bool {
        matches!(self, Self::UpstreamQuota { .. })
    }
}
