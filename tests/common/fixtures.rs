//! Payload fixtures and an orchestrator harness
//!
//! All fixtures create real objects, not mocks; only the upstream is faked.

use crate::common::upstream::ScriptedUpstream;
use provisiond::config::{BatchConfig, RateLimitConfig, RetryConfig, ViewCacheConfig};
use provisiond::core::batch::{BatchContext, BatchOrchestrator};
use provisiond::core::cache::{CacheInvalidator, ViewCache};
use provisiond::core::catalog::payload::{
    ConversionEventPayload, DataStreamPayload, TriggerPayload,
};
use provisiond::core::catalog::ResourcePayload;
use provisiond::core::quota::{MemoryQuotaStore, QuotaStore};
use provisiond::core::rate_limiter::RateLimiter;
use provisiond::core::retry::RetryScheduler;
use std::sync::Arc;
use uuid::Uuid;

/// A web data stream create item
pub fn stream_create(parent: &str, name: &str) -> ResourcePayload {
    ResourcePayload::DataStream(DataStreamPayload {
        parent: Some(parent.to_string()),
        display_name: Some(name.to_string()),
        stream_type: Some("WEB_DATA_STREAM".to_string()),
        uri: Some("https://example.com".to_string()),
        ..Default::default()
    })
}

/// A data stream delete item addressing an existing resource
pub fn stream_delete(id: &str) -> ResourcePayload {
    ResourcePayload::DataStream(DataStreamPayload {
        id: Some(id.to_string()),
        display_name: Some(id.to_string()),
        ..Default::default()
    })
}

/// A conversion event create item
pub fn conversion_event_create(parent: &str, event_name: &str) -> ResourcePayload {
    ResourcePayload::ConversionEvent(ConversionEventPayload {
        parent: Some(parent.to_string()),
        event_name: Some(event_name.to_string()),
        counting_method: Some("ONCE_PER_EVENT".to_string()),
        ..Default::default()
    })
}

/// A tag manager trigger create item
pub fn trigger_create(parent: &str, name: &str) -> ResourcePayload {
    ResourcePayload::Trigger(TriggerPayload {
        parent: Some(parent.to_string()),
        display_name: Some(name.to_string()),
        trigger_type: Some("pageview".to_string()),
        ..Default::default()
    })
}

/// Everything one orchestrator test needs, wired over fast configs
pub struct TestHarness {
    pub orchestrator: BatchOrchestrator,
    pub quota: Arc<MemoryQuotaStore>,
    pub upstream: Arc<ScriptedUpstream>,
    pub cache: Arc<ViewCache>,
    pub ctx: BatchContext,
}

/// Build a harness around a scripted upstream and an explicit quota store
pub fn harness_with_quota(upstream: ScriptedUpstream, quota: MemoryQuotaStore) -> TestHarness {
    let quota = Arc::new(quota);
    let upstream = Arc::new(upstream);
    let cache = Arc::new(ViewCache::new(ViewCacheConfig {
        enabled: true,
        ttl: 300,
        max_entries: 100,
    }));

    // Millisecond backoff and a generous bucket keep the suite fast while
    // still exercising the real retry and rate-limit paths.
    let orchestrator = BatchOrchestrator::new(
        quota.clone() as Arc<dyn QuotaStore>,
        RateLimiter::new(RateLimitConfig {
            enabled: true,
            per_user_rpm: 6000,
            max_wait_ms: 1000,
        }),
        RetryScheduler::new(RetryConfig {
            max_retries: 3,
            base_delay_ms: 1,
            max_jitter_ms: 0,
        }),
        upstream.clone(),
        CacheInvalidator::new(cache.clone()),
        BatchConfig {
            max_items: 10,
            max_concurrency: 4,
        },
    );

    TestHarness {
        orchestrator,
        quota,
        upstream,
        cache,
        ctx: BatchContext {
            user_id: Uuid::new_v4(),
            bearer_token: "test-token".to_string(),
        },
    }
}

/// Build a harness with a uniform quota of 100 on every feature
pub fn harness(upstream: ScriptedUpstream) -> TestHarness {
    harness_with_quota(upstream, MemoryQuotaStore::with_default_limit(100))
}
