//! End-to-end batch orchestration tests
//!
//! Real orchestrator, quota store, rate limiter, retry scheduler, and cache;
//! only the upstream is scripted.

use crate::common::fixtures::{
    conversion_event_create, harness, harness_with_quota, stream_create, stream_delete,
    trigger_create,
};
use crate::common::upstream::ScriptedUpstream;
use provisiond::core::batch::BatchRequest;
use provisiond::core::cache::view_key;
use provisiond::core::catalog::{Feature, OperationKind, Platform, ResourceType};
use provisiond::core::quota::{MemoryQuotaStore, QuotaStore};
use provisiond::GatewayError;
use serde_json::json;

fn create_batch(items: Vec<provisiond::ResourcePayload>) -> BatchRequest<provisiond::ResourcePayload> {
    BatchRequest {
        resource_type: ResourceType::DataStreams,
        operation: OperationKind::Create,
        items,
    }
}

// ==================== Happy Path Tests ====================

#[tokio::test]
async fn test_full_batch_succeeds_and_settles_accounting() {
    let h = harness(ScriptedUpstream::new());

    // Pre-populate the view so invalidation is observable
    let key = view_key(
        Platform::Analytics,
        ResourceType::DataStreams,
        h.ctx.user_id,
    );
    h.cache.put(key.clone(), json!({"stale": true}));

    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            create_batch(vec![
                stream_create("properties/1", "Web"),
                stream_create("properties/1", "iOS"),
                stream_create("properties/1", "Android"),
            ]),
        )
        .await
        .unwrap();

    assert!(response.success);
    assert!(!response.limit_reached);
    assert!(!response.not_found_error);
    assert_eq!(response.results.len(), 3);
    assert!(response.errors.is_empty());
    assert_eq!(h.upstream.call_count(), 3);

    // Usage incremented once with the success count
    let snapshot = h
        .quota
        .check_remaining(h.ctx.user_id, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.usage, 3);

    // The stale view is gone
    assert!(h.cache.get(&key).is_none());
}

#[tokio::test]
async fn test_results_preserve_input_order() {
    let h = harness(ScriptedUpstream::new());

    let names = ["a", "b", "c", "d", "e", "f"];
    let items = names
        .iter()
        .map(|name| stream_create("properties/1", name))
        .collect();

    let response = h.orchestrator.submit(&h.ctx, create_batch(items)).await.unwrap();

    let got: Vec<&str> = response.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(got, names);
}

#[tokio::test]
async fn test_success_id_comes_from_upstream_body() {
    let upstream = ScriptedUpstream::new().respond(
        "Web",
        Ok(json!({"name": "properties/1/dataStreams/42", "displayName": "Web"})),
    );
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap();

    assert_eq!(
        response.results[0].id.as_deref(),
        Some("properties/1/dataStreams/42")
    );
}

// ==================== Mixed Outcome Tests ====================

#[tokio::test]
async fn test_not_found_item_does_not_consume_quota() {
    let upstream = ScriptedUpstream::new()
        .respond("Missing", ScriptedUpstream::not_found("no such parent"));
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            create_batch(vec![
                stream_create("properties/1", "Web"),
                stream_create("properties/9", "Missing"),
            ]),
        )
        .await
        .unwrap();

    assert!(!response.success);
    assert!(response.not_found_error);
    assert!(!response.limit_reached);
    assert!(response.results[0].success);
    assert!(response.results[1].not_found);
    assert_eq!(response.errors.len(), 1);

    // Only the confirmed success was recorded
    let snapshot = h
        .quota
        .check_remaining(h.ctx.user_id, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.usage, 1);
}

#[tokio::test]
async fn test_upstream_quota_maps_to_limit_reached() {
    let upstream = ScriptedUpstream::new().respond(
        "Web",
        ScriptedUpstream::upstream_quota("Quota exceeded for quota metric 'Write requests'"),
    );
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap();

    assert!(!response.success);
    assert!(response.limit_reached);
    assert!(!response.not_found_error);
    assert!(response.results[0].limit_reached);
}

#[tokio::test]
async fn test_permission_denied_classifies_as_not_found() {
    let upstream = ScriptedUpstream::new().respond(
        "Web",
        Err(provisiond::core::upstream::UpstreamError::from_status(
            403,
            "The caller does not have permission".to_string(),
            None,
        )),
    );
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap();

    assert!(response.not_found_error);
    assert!(!response.limit_reached);
}

#[tokio::test]
async fn test_invalid_item_fails_without_upstream_call() {
    let h = harness(ScriptedUpstream::new());

    // Missing streamType fails validation for creates
    let invalid = provisiond::ResourcePayload::DataStream(Default::default());

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![invalid]))
        .await
        .unwrap();

    assert!(!response.success);
    assert!(!response.results[0].success);
    assert_eq!(h.upstream.call_count(), 0);
}

// ==================== Intake Rejection Tests ====================

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let h = harness(ScriptedUpstream::new());
    let err = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::BadRequest(_)));
}

#[tokio::test]
async fn test_oversized_batch_is_rejected() {
    let h = harness(ScriptedUpstream::new());

    // Harness caps batches at 10 items
    let items = (0..11)
        .map(|i| stream_create("properties/1", &format!("s{}", i)))
        .collect();
    let err = h
        .orchestrator
        .submit(&h.ctx, create_batch(items))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::BadRequest(_)));
    assert_eq!(h.upstream.call_count(), 0);
}

#[tokio::test]
async fn test_duplicate_identity_rejects_whole_batch() {
    let h = harness(ScriptedUpstream::new());

    let err = h
        .orchestrator
        .submit(
            &h.ctx,
            create_batch(vec![
                stream_create("properties/1", "Web"),
                stream_create("properties/1", "Web"),
            ]),
        )
        .await
        .unwrap_err();

    match err {
        GatewayError::BadRequest(msg) => assert!(msg.contains("duplicate")),
        other => panic!("expected BadRequest, got {:?}", other),
    }
    assert_eq!(h.upstream.call_count(), 0);
}

#[tokio::test]
async fn test_same_name_under_different_parents_is_allowed() {
    let h = harness(ScriptedUpstream::new());

    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            create_batch(vec![
                stream_create("properties/1", "Web"),
                stream_create("properties/2", "Web"),
            ]),
        )
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(h.upstream.call_count(), 2);
}

#[tokio::test]
async fn test_missing_subscription_is_fatal() {
    let h = harness_with_quota(ScriptedUpstream::new(), MemoryQuotaStore::new());

    let err = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Authorization(_)));
    assert_eq!(h.upstream.call_count(), 0);
}

// ==================== Subscription Quota Tests ====================

#[tokio::test]
async fn test_batch_larger_than_remaining_quota_is_rejected_without_calls() {
    let quota = MemoryQuotaStore::new();
    let h = harness_with_quota(ScriptedUpstream::new(), quota);
    h.quota
        .set_limit(h.ctx.user_id, Feature::Streams, OperationKind::Create, 2);

    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            create_batch(vec![
                stream_create("properties/1", "a"),
                stream_create("properties/1", "b"),
                stream_create("properties/1", "c"),
            ]),
        )
        .await
        .unwrap();

    assert!(!response.success);
    assert!(response.limit_reached);
    assert_eq!(response.results.len(), 3);
    assert!(response.results.iter().all(|r| r.limit_reached));
    // No upstream traffic and no usage consumed
    assert_eq!(h.upstream.call_count(), 0);
    let snapshot = h
        .quota
        .check_remaining(h.ctx.user_id, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.usage, 0);
}

#[tokio::test]
async fn test_quota_rejection_leaves_cache_untouched() {
    let quota = MemoryQuotaStore::new();
    let h = harness_with_quota(ScriptedUpstream::new(), quota);
    h.quota
        .set_limit(h.ctx.user_id, Feature::Streams, OperationKind::Create, 0);

    let key = view_key(
        Platform::Analytics,
        ResourceType::DataStreams,
        h.ctx.user_id,
    );
    h.cache.put(key.clone(), json!({"cached": true}));

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "a")]))
        .await
        .unwrap();

    assert!(response.limit_reached);
    assert!(h.cache.get(&key).is_some());
}

#[tokio::test]
async fn test_operations_are_metered_independently() {
    let quota = MemoryQuotaStore::new();
    let h = harness_with_quota(ScriptedUpstream::new(), quota);
    h.quota
        .set_limit(h.ctx.user_id, Feature::Streams, OperationKind::Create, 0);
    h.quota
        .set_limit(h.ctx.user_id, Feature::Streams, OperationKind::Delete, 5);

    // Creates are exhausted but deletes still flow
    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            BatchRequest {
                resource_type: ResourceType::DataStreams,
                operation: OperationKind::Delete,
                items: vec![stream_delete("properties/1/dataStreams/2")],
            },
        )
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(h.upstream.call_count(), 1);
}

// ==================== Retry Tests ====================

#[tokio::test]
async fn test_rate_limited_item_retries_until_success() {
    let upstream = ScriptedUpstream::new()
        .respond("Web", ScriptedUpstream::rate_limited())
        .respond("Web", ScriptedUpstream::rate_limited())
        .respond("Web", ScriptedUpstream::rate_limited())
        .respond("Web", Ok(json!({"name": "properties/1/dataStreams/7"})));
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap();

    assert!(response.success);
    // Initial attempt plus three retries
    assert_eq!(h.upstream.call_count(), 4);
    let snapshot = h
        .quota
        .check_remaining(h.ctx.user_id, Feature::Streams, OperationKind::Create)
        .await
        .unwrap();
    assert_eq!(snapshot.usage, 1);
}

#[tokio::test]
async fn test_exhausted_retries_fail_the_item_generically() {
    let mut upstream = ScriptedUpstream::new();
    for _ in 0..5 {
        upstream = upstream.respond("Web", ScriptedUpstream::rate_limited());
    }
    let h = harness(upstream);

    let response = h
        .orchestrator
        .submit(&h.ctx, create_batch(vec![stream_create("properties/1", "Web")]))
        .await
        .unwrap();

    assert!(!response.success);
    // A persistent 429 is a generic failure, not a quota signal
    assert!(!response.limit_reached);
    assert!(!response.not_found_error);
    assert!(!response.results[0].success);
    assert_eq!(h.upstream.call_count(), 4);
    assert_eq!(response.errors.len(), 1);
}

// ==================== Cross-Platform Tests ====================

#[tokio::test]
async fn test_tag_manager_batch_invalidates_its_own_view() {
    let h = harness(ScriptedUpstream::new());

    let analytics_key = view_key(
        Platform::Analytics,
        ResourceType::DataStreams,
        h.ctx.user_id,
    );
    let tag_manager_key = view_key(Platform::TagManager, ResourceType::Triggers, h.ctx.user_id);
    h.cache.put(analytics_key.clone(), json!(1));
    h.cache.put(tag_manager_key.clone(), json!(2));

    let response = h
        .orchestrator
        .submit(
            &h.ctx,
            BatchRequest {
                resource_type: ResourceType::Triggers,
                operation: OperationKind::Create,
                items: vec![trigger_create(
                    "accounts/1/containers/2/workspaces/3",
                    "All Pages",
                )],
            },
        )
        .await
        .unwrap();

    assert!(response.success);
    assert!(h.cache.get(&tag_manager_key).is_none());
    assert!(h.cache.get(&analytics_key).is_some());
}

#[tokio::test]
async fn test_conversion_event_identity_uses_event_name() {
    let h = harness(ScriptedUpstream::new());

    let err = h
        .orchestrator
        .submit(
            &h.ctx,
            BatchRequest {
                resource_type: ResourceType::ConversionEvents,
                operation: OperationKind::Create,
                items: vec![
                    conversion_event_create("properties/1", "purchase"),
                    conversion_event_create("properties/1", "purchase"),
                ],
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::BadRequest(_)));
}
