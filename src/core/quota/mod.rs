//! Per-user, per-feature usage quotas
//!
//! Quota counters live in the relational store, one row per (subscription,
//! feature) with separate limit/usage columns per operation kind. The
//! orchestrator checks remaining quota once per batch before any upstream
//! traffic and records usage once per batch with the count of confirmed
//! successes.
//!
//! Known race: two concurrent batches for the same user can both pass the
//! pre-check and jointly push usage past the limit, because the check and
//! the increment are not one transaction. The increment itself is atomic at
//! the store, so counters never lose updates; they can only overshoot.

pub mod memory;
pub mod sql;

pub use memory::MemoryQuotaStore;
pub use sql::SqlQuotaStore;

use crate::core::catalog::{Feature, OperationKind};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Quota store failures
#[derive(Debug, Error)]
pub enum QuotaError {
    /// The user has no active subscription row; fatal for the whole batch
    #[error("no active subscription for user {user_id}")]
    SubscriptionNotFound { user_id: Uuid },

    /// Relational store failure
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Any other store failure
    #[error("quota store error: {0}")]
    Store(String),
}

/// Limit and usage for one (feature, operation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    /// Configured limit for the subscription tier
    pub limit: i64,
    /// Usage recorded so far
    pub usage: i64,
}

impl QuotaSnapshot {
    /// Remaining quota, never negative
    pub fn remaining(&self) -> i64 {
        (self.limit - self.usage).max(0)
    }
}

/// Per-feature usage breakdown for the dashboard's usage meter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    /// Feature name as stored in quota rows
    pub feature: String,
    /// Create limit/usage
    pub create: QuotaSnapshot,
    /// Update limit/usage
    pub update: QuotaSnapshot,
    /// Delete limit/usage
    pub delete: QuotaSnapshot,
}

/// Reads and increments per-user usage counters against a configured limit
///
/// Implementations must serialize increments at the store; the orchestrator
/// never does read-modify-write on usage in its own memory.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Read the counter for one (user, feature, operation)
    ///
    /// A missing tier row reads as limit 0 / usage 0.
    async fn check_remaining(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
    ) -> Result<QuotaSnapshot, QuotaError>;

    /// Atomically add `n` to the usage counter
    async fn record_usage(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
        n: u64,
    ) -> Result<(), QuotaError>;

    /// Full per-feature breakdown for one user
    async fn usage_report(&self, user_id: Uuid) -> Result<Vec<FeatureUsage>, QuotaError>;
}
