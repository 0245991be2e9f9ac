use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription database model
///
/// One row per dashboard user, created at signup. This core only reads it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Subscription ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user (unique)
    #[sea_orm(unique)]
    pub user_id: Uuid,

    /// Plan name, e.g. "starter", "pro"
    pub plan: String,

    /// Subscription status; only "active" rows grant quota
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Subscription entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Tier limit rows relation
    #[sea_orm(has_many = "super::tier_limit::Entity")]
    TierLimits,
}

impl Related<super::tier_limit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TierLimits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
