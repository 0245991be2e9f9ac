use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tier limit database model
///
/// One row per (subscription, feature) holding limit/usage counters for
/// each operation kind. Usage columns are mutated exclusively through the
/// quota store's atomic increment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tier_limits")]
pub struct Model {
    /// Row ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning subscription
    pub subscription_id: Uuid,

    /// Feature name, e.g. "Streams"
    pub feature: String,

    /// Create operation limit
    pub create_limit: i64,
    /// Create operations consumed
    pub create_usage: i64,

    /// Update operation limit
    pub update_limit: i64,
    /// Update operations consumed
    pub update_usage: i64,

    /// Delete operation limit
    pub delete_limit: i64,
    /// Delete operations consumed
    pub delete_usage: i64,
}

/// Tier limit entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning subscription relation
    #[sea_orm(
        belongs_to = "super::subscription::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscription::Column::Id"
    )]
    Subscription,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
