//! Batch orchestration pipeline
//!
//! One `submit` call runs the whole lifecycle: de-duplication, one quota
//! pre-check, bounded concurrent fan-out with per-item rate limiting and
//! retry, classification, one usage increment, and cache invalidation.

use super::aggregator::{classify, ItemOutcome, ResultAggregator};
use super::types::{BatchContext, BatchRequest, FeatureResponse, ItemState};
use crate::config::BatchConfig;
use crate::core::cache::{view_key, CacheInvalidator};
use crate::core::catalog::{ItemPayload, OperationKind, Platform};
use crate::core::quota::QuotaStore;
use crate::core::rate_limiter::RateLimiter;
use crate::core::retry::RetryScheduler;
use crate::core::upstream::UpstreamApi;
use crate::core::validation::RequestValidator;
use crate::utils::{GatewayError, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives one batch from intake to response
///
/// Holds only shared handles; cloning is cheap and every clone observes the
/// same rate-limiter buckets, quota counters, and cache.
#[derive(Clone)]
pub struct BatchOrchestrator {
    quota: Arc<dyn QuotaStore>,
    rate_limiter: RateLimiter,
    retry: RetryScheduler,
    upstream: Arc<dyn UpstreamApi>,
    invalidator: CacheInvalidator,
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        quota: Arc<dyn QuotaStore>,
        rate_limiter: RateLimiter,
        retry: RetryScheduler,
        upstream: Arc<dyn UpstreamApi>,
        invalidator: CacheInvalidator,
        config: BatchConfig,
    ) -> Self {
        Self {
            quota,
            rate_limiter,
            retry,
            upstream,
            invalidator,
            config,
        }
    }

    /// Run one batch end to end
    ///
    /// Fatal intake failures (empty or oversized batch, duplicate identity,
    /// missing subscription) return an `Err` and perform no upstream calls.
    /// Everything past intake resolves into a [`FeatureResponse`], including
    /// the whole-batch quota rejection.
    pub async fn submit<P: ItemPayload>(
        &self,
        ctx: &BatchContext,
        request: BatchRequest<P>,
    ) -> Result<FeatureResponse> {
        let BatchRequest {
            resource_type,
            operation,
            items,
        } = request;

        if items.is_empty() {
            return Err(GatewayError::BadRequest("batch contains no items".to_string()));
        }
        if items.len() > self.config.max_items {
            return Err(GatewayError::BadRequest(format!(
                "batch of {} items exceeds the maximum of {}",
                items.len(),
                self.config.max_items
            )));
        }

        // Duplicate identity makes per-item results ambiguous; reject the
        // whole batch before spending quota or upstream calls.
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let key = item.identity_key(operation);
            if !seen.insert(key.clone()) {
                return Err(GatewayError::BadRequest(format!(
                    "duplicate {} item '{}' in batch",
                    resource_type, key
                )));
            }
        }

        let feature = resource_type.feature();
        let platform = resource_type.platform();
        let batch_size = items.len();

        // One pre-check for the whole batch. Checked against the full batch
        // size: a batch that cannot fully fit is rejected without touching
        // the upstream at all.
        let snapshot = self
            .quota
            .check_remaining(ctx.user_id, feature, operation)
            .await?;
        if batch_size as i64 > snapshot.remaining() {
            warn!(
                user = %ctx.user_id,
                feature = %feature,
                op = %operation,
                batch_size,
                remaining = snapshot.remaining(),
                "batch rejected by subscription quota"
            );
            let names = items.iter().map(|item| item.display_name()).collect();
            return Ok(FeatureResponse::quota_rejected(
                resource_type,
                operation,
                snapshot.remaining(),
                names,
            ));
        }

        info!(
            user = %ctx.user_id,
            resource_type = %resource_type,
            op = %operation,
            batch_size,
            "dispatching batch"
        );

        let outcomes: Vec<(usize, ItemOutcome)> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                (index, self.run_item(ctx, platform, operation, item).await)
            })
            .buffer_unordered(self.config.max_concurrency)
            .collect()
            .await;

        let mut aggregator = ResultAggregator::new();
        for (index, outcome) in outcomes {
            aggregator.push(index, outcome);
        }

        let succeeded = aggregator.succeeded_count();

        // Usage is recorded once per batch with the confirmed success count.
        // The response is already final at this point, so a failed increment
        // is logged rather than turned into a caller-visible error.
        if succeeded > 0 {
            if let Err(err) = self
                .quota
                .record_usage(ctx.user_id, feature, operation, succeeded)
                .await
            {
                error!(
                    user = %ctx.user_id,
                    feature = %feature,
                    op = %operation,
                    succeeded,
                    error = %err,
                    "failed to record quota usage"
                );
            }

            self.invalidator
                .invalidate(&[view_key(platform, resource_type, ctx.user_id)]);
        }

        let response = aggregator.finish();
        info!(
            user = %ctx.user_id,
            resource_type = %resource_type,
            op = %operation,
            succeeded,
            failed = batch_size as u64 - succeeded,
            "batch complete"
        );
        Ok(response)
    }

    /// Run one item through validation, rate limiting, and the retried
    /// upstream call
    async fn run_item<P: ItemPayload>(
        &self,
        ctx: &BatchContext,
        platform: Platform,
        operation: OperationKind,
        mut item: P,
    ) -> ItemOutcome {
        debug!(item = %item.display_name(), state = %ItemState::Validating, "item state");
        if let Err(err) = RequestValidator::validate(operation, &mut item) {
            return ItemOutcome::Failed {
                id: item.resource_id().map(str::to_string),
                name: item.display_name(),
                message: err.to_string(),
            };
        }

        let name = item.display_name();
        let id = item.resource_id().map(str::to_string);

        if let Err(err) = self.rate_limiter.acquire(ctx.user_id, platform).await {
            debug!(item = %name, state = %ItemState::Failed, "rate limit wait budget exhausted");
            return ItemOutcome::Failed {
                id,
                name,
                message: err.to_string(),
            };
        }

        debug!(item = %name, state = %ItemState::InFlight, "item state");
        let call = item.upstream_call(operation);
        let result = self
            .retry
            .run(|| self.upstream.execute(&ctx.bearer_token, &call))
            .await;

        let outcome = classify(name, id, result);
        let state = match &outcome {
            ItemOutcome::Succeeded { .. } => ItemState::Succeeded,
            ItemOutcome::NotFound { .. } => ItemState::NotFound,
            ItemOutcome::LimitReached { .. } => ItemState::LimitReached,
            ItemOutcome::Failed { .. } => ItemState::Failed,
        };
        debug!(state = %state, "item state");
        outcome
    }
}
