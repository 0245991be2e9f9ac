//! Test database utilities
//!
//! Provides in-memory SQLite databases for testing without external
//! dependencies. Each test gets an isolated instance using SeaORM.

use chrono::Utc;
use provisiond::config::DatabaseConfig;
use provisiond::core::catalog::Feature;
use provisiond::storage::database::entities::{subscription, tier_limit};
use provisiond::storage::Database;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database with migrations applied
    ///
    /// Note: SQLite in-memory mode requires the 'sqlite' feature. Each call
    /// creates a completely isolated database instance.
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // In-memory DB only supports 1 connection
            connection_timeout: 5,
            enabled: true,
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    /// Insert an active subscription for a user, returning the subscription id
    pub async fn seed_subscription(&self, user_id: Uuid) -> Uuid {
        self.seed_subscription_with_status(user_id, "active").await
    }

    /// Insert a subscription with an explicit status
    pub async fn seed_subscription_with_status(&self, user_id: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        subscription::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            plan: Set("pro".to_string()),
            status: Set(status.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.inner.connection())
        .await
        .expect("Failed to seed subscription");
        id
    }

    /// Insert a tier row with a uniform limit across all three operations
    pub async fn seed_tier_limit(&self, subscription_id: Uuid, feature: Feature, limit: i64) {
        tier_limit::ActiveModel {
            subscription_id: Set(subscription_id),
            feature: Set(feature.as_str().to_string()),
            create_limit: Set(limit),
            create_usage: Set(0),
            update_limit: Set(limit),
            update_usage: Set(0),
            delete_limit: Set(limit),
            delete_usage: Set(0),
            ..Default::default()
        }
        .insert(self.inner.connection())
        .await
        .expect("Failed to seed tier limit");
    }
}
