//! Batch request and response types

use crate::core::catalog::{OperationKind, ResourceType};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Who is submitting the batch, with the upstream credential already attached
///
/// Credential acquisition is the caller's concern; this layer only carries
/// the bearer token through to the upstream client.
#[derive(Debug, Clone)]
pub struct BatchContext {
    /// Acting dashboard user
    pub user_id: Uuid,
    /// Upstream bearer token
    pub bearer_token: String,
}

/// One batch of homogeneous write operations
///
/// Ephemeral: owned by one orchestrator invocation and discarded after the
/// call returns.
#[derive(Debug, Clone)]
pub struct BatchRequest<P> {
    /// Resource type every item provisions
    pub resource_type: ResourceType,
    /// Operation applied to every item
    pub operation: OperationKind,
    /// Ordered item payloads
    pub items: Vec<P>,
}

/// Lifecycle of one item inside the orchestrator
///
/// Terminal states are final; there is no retry across items, only within a
/// single in-flight call via the retry scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemState {
    Pending,
    Validating,
    RateLimited(Duration),
    InFlight,
    Succeeded,
    NotFound,
    LimitReached,
    Failed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemState::Pending => f.write_str("pending"),
            ItemState::Validating => f.write_str("validating"),
            ItemState::RateLimited(wait) => write!(f, "rateLimited({}ms)", wait.as_millis()),
            ItemState::InFlight => f.write_str("inFlight"),
            ItemState::Succeeded => f.write_str("succeeded"),
            ItemState::NotFound => f.write_str("notFound"),
            ItemState::LimitReached => f.write_str("limitReached"),
            ItemState::Failed => f.write_str("failed"),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Outcome of one item, in the shape the dashboard consumes
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    /// Upstream resource path, when known
    pub id: Option<String>,
    /// Display name of the item
    pub name: String,
    /// Whether the upstream call succeeded
    pub success: bool,
    /// The resource was missing or the caller lacks permission on it
    #[serde(skip_serializing_if = "is_false")]
    pub not_found: bool,
    /// An upstream quota rejected the item
    #[serde(skip_serializing_if = "is_false")]
    pub limit_reached: bool,
    /// Failure detail, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ItemResult {
    /// A succeeded item
    pub fn succeeded(id: Option<String>, name: String) -> Self {
        Self {
            id,
            name,
            success: true,
            not_found: false,
            limit_reached: false,
            error_message: None,
        }
    }

    /// A not-found or permission-denied item
    pub fn not_found(id: Option<String>, name: String, message: String) -> Self {
        Self {
            id,
            name,
            success: false,
            not_found: true,
            limit_reached: false,
            error_message: Some(message),
        }
    }

    /// An item rejected by an upstream quota
    pub fn limit_reached(id: Option<String>, name: String, message: String) -> Self {
        Self {
            id,
            name,
            success: false,
            not_found: false,
            limit_reached: true,
            error_message: Some(message),
        }
    }

    /// A generically failed item
    pub fn failed(id: Option<String>, name: String, message: String) -> Self {
        Self {
            id,
            name,
            success: false,
            not_found: false,
            limit_reached: false,
            error_message: Some(message),
        }
    }
}

/// The externally visible batch response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureResponse {
    /// True iff every item succeeded
    pub success: bool,
    /// The subscription tier or an upstream quota rejected work
    pub limit_reached: bool,
    /// At least one item hit not-found or permission-denied
    pub not_found_error: bool,
    /// Human-readable summary
    pub message: String,
    /// Failure messages, captured verbatim
    pub errors: Vec<String>,
    /// Per-item breakdown, in input order
    pub results: Vec<ItemResult>,
}

impl FeatureResponse {
    /// Whole-batch rejection because the batch size exceeds remaining quota
    ///
    /// Carries one synthetic "would exceed" result per input item; no
    /// upstream call was made.
    pub fn quota_rejected(
        resource_type: ResourceType,
        operation: OperationKind,
        remaining: i64,
        item_names: Vec<String>,
    ) -> Self {
        let message = format!(
            "cannot {} {} {}: only {} remaining in the {} {} quota",
            operation,
            item_names.len(),
            resource_type,
            remaining,
            resource_type.feature(),
            operation,
        );
        let results = item_names
            .into_iter()
            .map(|name| ItemResult::limit_reached(None, name, "would exceed remaining quota".to_string()))
            .collect();
        Self {
            success: false,
            limit_reached: true,
            not_found_error: false,
            message,
            errors: Vec::new(),
            results,
        }
    }
}
