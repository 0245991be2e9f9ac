//! Batch submission endpoint

use crate::core::batch::{BatchContext, BatchRequest};
use crate::core::catalog::{OperationKind, ResourcePayload, ResourceType};
use crate::server::middleware::Identity;
use crate::server::state::AppState;
use crate::utils::{GatewayError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/batches", web::post().to(submit_batch));
}

/// Inbound batch submission body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSubmission {
    /// Resource type every item provisions
    pub resource_type: ResourceType,
    /// Operation applied to every item
    pub operation_kind: OperationKind,
    /// Raw item payloads, deserialized per resource type
    pub items: Vec<serde_json::Value>,
}

/// Submit one batch of homogeneous write operations
///
/// Returns 200 with a feature response for every batch that passes intake,
/// including fully failed and quota-rejected ones. Intake failures map to
/// 400 (shape, duplicates, size) or 403 (no active subscription).
pub async fn submit_batch(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BatchSubmission>,
) -> Result<HttpResponse> {
    let submission = body.into_inner();
    debug!(
        resource_type = %submission.resource_type,
        op = %submission.operation_kind,
        items = submission.items.len(),
        "batch submission received"
    );

    let resource_type = submission.resource_type;
    let items: Vec<ResourcePayload> = submission
        .items
        .into_iter()
        .map(|value| ResourcePayload::from_value(resource_type, value))
        .collect::<std::result::Result<_, _>>()
        .map_err(|err| {
            GatewayError::Validation(format!("malformed {} item: {}", resource_type, err))
        })?;

    let ctx = BatchContext {
        user_id: identity.user_id,
        bearer_token: identity.bearer_token,
    };
    let response = state
        .orchestrator
        .submit(
            &ctx,
            BatchRequest {
                resource_type,
                operation: submission.operation_kind,
                items,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
