//! Per-user rate limiting for upstream calls
//!
//! A token bucket per (user, upstream API family) answers exactly one
//! question: may this user call that upstream right now. It knows nothing
//! about retries or quotas. All concurrent items of a batch, and concurrent
//! batches of the same user, contend for the same bucket.

pub mod limiter;
pub mod types;

pub use limiter::RateLimiter;
pub use types::{RateLimitExceeded, Reservation};
