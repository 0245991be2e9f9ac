//! SQL quota store tests against an in-memory database

use crate::common::database::TestDatabase;
use provisiond::core::catalog::{Feature, OperationKind};
use provisiond::core::quota::{QuotaError, QuotaStore, SqlQuotaStore};
use uuid::Uuid;

// ==================== Lookup Tests ====================

#[tokio::test]
async fn test_unknown_user_has_no_subscription() {
    let db = TestDatabase::new().await;
    let store = SqlQuotaStore::new(db.db_arc());

    let err = store
        .check_remaining(Uuid::new_v4(), Feature::Streams, OperationKind::Create)
        .await
        .unwrap_err();
    assert!(matches!(err, QuotaError::SubscriptionNotFound { .. }));
}

#[tokio::test]
async fn test_inactive_subscription_grants_nothing() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription_with_status(user, "cancelled").await;
    db.seed_tier_limit(sub, Feature::Streams, 10).await;

    let store = SqlQuotaStore::new(db.db_arc());
    let err = store
        .check_remaining(user, Feature::Streams, OperationKind::Create)
        .await
        .unwrap_err();
    assert!(matches!(err, QuotaError::SubscriptionNotFound { .. }));
}

#[tokio::test]
async fn test_missing_tier_row_reads_as_zero() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    db.seed_subscription(user).await;

    let store = SqlQuotaStore::new(db.db_arc());
    let snapshot = store
        .check_remaining(user, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.limit, 0);
    assert_eq!(snapshot.remaining(), 0);
}

#[tokio::test]
async fn test_seeded_limit_is_visible() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription(user).await;
    db.seed_tier_limit(sub, Feature::Streams, 25).await;

    let store = SqlQuotaStore::new(db.db_arc());
    let snapshot = store
        .check_remaining(user, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.limit, 25);
    assert_eq!(snapshot.usage, 0);
    assert_eq!(snapshot.remaining(), 25);
}

// ==================== Increment Tests ====================

#[tokio::test]
async fn test_record_usage_accumulates_per_operation() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription(user).await;
    db.seed_tier_limit(sub, Feature::Streams, 10).await;

    let store = SqlQuotaStore::new(db.db_arc());
    store
        .record_usage(user, Feature::Streams, OperationKind::Create, 3)
        .await
        .unwrap();
    store
        .record_usage(user, Feature::Streams, OperationKind::Create, 2)
        .await
        .unwrap();
    store
        .record_usage(user, Feature::Streams, OperationKind::Delete, 1)
        .await
        .unwrap();

    let creates = store
        .check_remaining(user, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(creates.usage, 5);
    assert_eq!(creates.remaining(), 5);

    let deletes = store
        .check_remaining(user, Feature::Streams, OperationKind::Delete)
        .await
        .unwrap();
    assert_eq!(deletes.usage, 1);
}

#[tokio::test]
async fn test_record_zero_is_a_noop() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription(user).await;
    db.seed_tier_limit(sub, Feature::Triggers, 5).await;

    let store = SqlQuotaStore::new(db.db_arc());
    store
        .record_usage(user, Feature::Triggers, OperationKind::Create, 0)
        .await
        .unwrap();

    let snapshot = store
        .check_remaining(user, Feature::Triggers, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.usage, 0);
}

#[tokio::test]
async fn test_features_are_metered_separately() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription(user).await;
    db.seed_tier_limit(sub, Feature::Streams, 10).await;
    db.seed_tier_limit(sub, Feature::Triggers, 10).await;

    let store = SqlQuotaStore::new(db.db_arc());
    store
        .record_usage(user, Feature::Streams, OperationKind::Create, 4)
        .await
        .unwrap();

    let triggers = store
        .check_remaining(user, Feature::Triggers, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(triggers.usage, 0);
}

// ==================== Report Tests ====================

#[tokio::test]
async fn test_usage_report_covers_all_features() {
    let db = TestDatabase::new().await;
    let user = Uuid::new_v4();
    let sub = db.seed_subscription(user).await;
    db.seed_tier_limit(sub, Feature::Streams, 10).await;

    let store = SqlQuotaStore::new(db.db_arc());
    store
        .record_usage(user, Feature::Streams, OperationKind::Create, 2)
        .await
        .unwrap();

    let report = store.usage_report(user).await.unwrap();
    assert_eq!(report.len(), Feature::ALL.len());

    let streams = report
        .iter()
        .find(|f| f.feature == Feature::Streams.as_str())
        .unwrap();
    assert_eq!(streams.create.limit, 10);
    assert_eq!(streams.create.usage, 2);

    // Features without a tier row read as zero
    let accounts = report
        .iter()
        .find(|f| f.feature == Feature::Accounts.as_str())
        .unwrap();
    assert_eq!(accounts.create.limit, 0);
}
