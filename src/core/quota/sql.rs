//! SeaORM-backed quota store

use super::{FeatureUsage, QuotaError, QuotaSnapshot, QuotaStore};
use crate::core::catalog::{Feature, OperationKind};
use crate::storage::database::entities::{subscription, tier_limit};
use crate::storage::Database;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const ACTIVE_STATUS: &str = "active";

/// Relational [`QuotaStore`] over the `subscriptions` and `tier_limits` tables
pub struct SqlQuotaStore {
    db: Arc<Database>,
}

impl SqlQuotaStore {
    /// Create a new store over an established connection
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn active_subscription(
        &self,
        user_id: Uuid,
    ) -> Result<subscription::Model, QuotaError> {
        subscription::Entity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .filter(subscription::Column::Status.eq(ACTIVE_STATUS))
            .one(self.db.connection())
            .await?
            .ok_or(QuotaError::SubscriptionNotFound { user_id })
    }

    fn usage_column(op: OperationKind) -> tier_limit::Column {
        match op {
            OperationKind::Create => tier_limit::Column::CreateUsage,
            OperationKind::Update => tier_limit::Column::UpdateUsage,
            OperationKind::Delete => tier_limit::Column::DeleteUsage,
        }
    }

    fn snapshot(row: &tier_limit::Model, op: OperationKind) -> QuotaSnapshot {
        match op {
            OperationKind::Create => QuotaSnapshot {
                limit: row.create_limit,
                usage: row.create_usage,
            },
            OperationKind::Update => QuotaSnapshot {
                limit: row.update_limit,
                usage: row.update_usage,
            },
            OperationKind::Delete => QuotaSnapshot {
                limit: row.delete_limit,
                usage: row.delete_usage,
            },
        }
    }
}

#[async_trait]
impl QuotaStore for SqlQuotaStore {
    async fn check_remaining(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
    ) -> Result<QuotaSnapshot, QuotaError> {
        let sub = self.active_subscription(user_id).await?;
        let row = tier_limit::Entity::find()
            .filter(tier_limit::Column::SubscriptionId.eq(sub.id))
            .filter(tier_limit::Column::Feature.eq(feature.as_str()))
            .one(self.db.connection())
            .await?;

        // A subscription without a tier row for the feature has no quota
        Ok(row
            .map(|row| Self::snapshot(&row, op))
            .unwrap_or(QuotaSnapshot { limit: 0, usage: 0 }))
    }

    async fn record_usage(
        &self,
        user_id: Uuid,
        feature: Feature,
        op: OperationKind,
        n: u64,
    ) -> Result<(), QuotaError> {
        if n == 0 {
            return Ok(());
        }

        let sub = self.active_subscription(user_id).await?;
        let column = Self::usage_column(op);

        // Single atomic UPDATE at the store; no read-modify-write in memory
        let result = tier_limit::Entity::update_many()
            .col_expr(column, Expr::col(column).add(n as i64))
            .filter(tier_limit::Column::SubscriptionId.eq(sub.id))
            .filter(tier_limit::Column::Feature.eq(feature.as_str()))
            .exec(self.db.connection())
            .await?;

        debug!(
            user = %user_id,
            feature = %feature,
            op = %op,
            n,
            rows = result.rows_affected,
            "recorded quota usage"
        );
        Ok(())
    }

    async fn usage_report(&self, user_id: Uuid) -> Result<Vec<FeatureUsage>, QuotaError> {
        let sub = self.active_subscription(user_id).await?;
        let rows = tier_limit::Entity::find()
            .filter(tier_limit::Column::SubscriptionId.eq(sub.id))
            .all(self.db.connection())
            .await?;

        let by_feature: HashMap<&str, &tier_limit::Model> =
            rows.iter().map(|row| (row.feature.as_str(), row)).collect();

        let mut report = Vec::with_capacity(Feature::ALL.len());
        for feature in Feature::ALL {
            let usage = match by_feature.get(feature.as_str()) {
                Some(row) => FeatureUsage {
                    feature: feature.as_str().to_string(),
                    create: Self::snapshot(row, OperationKind::Create),
                    update: Self::snapshot(row, OperationKind::Update),
                    delete: Self::snapshot(row, OperationKind::Delete),
                },
                None => FeatureUsage {
                    feature: feature.as_str().to_string(),
                    create: QuotaSnapshot { limit: 0, usage: 0 },
                    update: QuotaSnapshot { limit: 0, usage: 0 },
                    delete: QuotaSnapshot { limit: 0, usage: 0 },
                },
            };
            report.push(usage);
        }
        Ok(report)
    }
}
