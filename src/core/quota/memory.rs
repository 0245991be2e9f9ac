//! In-process quota store
//!
//! Used by tests and by db-less development mode. Counters live behind a
//! single lock, so the check/increment discipline matches the SQL store.

use super::{FeatureUsage, QuotaError, QuotaSnapshot, QuotaStore};
use crate::core::catalog::{Feature, OperationKind};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
struct TierCounters {
    limits: [i64; 3],
    usage: [i64; 3],
}

fn op_index(op: OperationKind) -> usize {
    match op {
        OperationKind::Create => 0,
        OperationKind::Update => 1,
        OperationKind::Delete => 2,
    }
}

/// In-memory [`QuotaStore`]
pub struct MemoryQuotaStore {
    users: Mutex<HashMap<Uuid, HashMap<Feature, TierCounters>>>,
    /// When set, unknown users are registered on first touch with this
    /// limit on every (feature, operation) pair
    default_limit: Option<i64>,
}

impl MemoryQuotaStore {
    /// Create an empty store; unknown users fail with `SubscriptionNotFound`
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            default_limit: None,
        }
    }

    /// Create a store that auto-registers users with a uniform limit
    pub fn with_default_limit(limit: i64) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            default_limit: Some(limit),
        }
    }

    /// Register a user with no tier rows
    pub fn register(&self, user_id: Uuid) {
        self.users.lock().entry(user_id).or_default();
    }

    /// Set the limit for one (user, feature, operation), registering the user
    pub fn set_limit(&self, user_id: Uuid, feature: Feature, op: OperationKind, limit: i64) {
        let mut users = self.users.lock();
        let tiers = users.entry(user_id).or_default();
        tiers.entry(feature).or_default().limits[op_index(op)] = limit;
    }

    fn counters_for(
        &self,
        user_id: Uuid,
        feature: Feature,
    ) -> Result<TierCounters, QuotaError> {
        let mut users = self.users.lock();
        if !users.contains_key(&user_id) {
            match self.default_limit {
                Some(limit) => {
                    let tiers = users.entry(user_id).or_default();
                    for feature in Feature::ALL {
                        tiers.insert(
                            feature,
                            TierCounters {
                                limits: [limit; 3],
                                usage: [0; 3],
                            },
                        );
                    }
                }
                None => return Err(QuotaError::SubscriptionNotFound { user_id }),
            }
        }
        Ok(users
            .get(&user_id)
            .and_then(|tiers| tiers.get(&feature))
            .copied()
            .unwrap_or_default())
    }
}

impl Default for MemoryQuotaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuotaStore for MemoryQuotaStore {
    async fn check_remaining(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
    ) -> Result<QuotaSnapshot, QuotaError> {
        let counters = self.counters_for(user_id, feature)?;
        let idx = op_index(op);
        Ok(QuotaSnapshot {
            limit: counters.limits[idx],
            usage: counters.usage[idx],
        })
    }

    async fn record_usage(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
        n: u64,
    ) -> Result<(), QuotaError> {
        // Touch first so auto-registration applies before the lock below
        self.counters_for(user_id, feature)?;

        let mut users = self.users.lock();
        let tiers = users
            .get_mut(&user_id)
            .ok_or(QuotaError::SubscriptionNotFound { user_id })?;
        tiers.entry(feature).or_default().usage[op_index(op)] += n as i64;
        Ok(())
    }

    async fn usage_report(&self, user_id: Uuid) -> Result<Vec<FeatureUsage>, QuotaError> {
        let mut report = Vec::with_capacity(Feature::ALL.len());
        for feature in Feature::ALL {
            let counters = self.counters_for(user_id, feature)?;
            report.push(FeatureUsage {
                feature: feature.as_str().to_string(),
                create: QuotaSnapshot {
                    limit: counters.limits[0],
                    usage: counters.usage[0],
                },
                update: QuotaSnapshot {
                    limit: counters.limits[1],
                    usage: counters.usage[1],
                },
                delete: QuotaSnapshot {
                    limit: counters.limits[2],
                    usage: counters.usage[2],
                },
            });
        }
        Ok(report)
    }
}
