//! Cached read views over upstream list endpoints

use crate::core::cache::view_key;
use crate::core::catalog::{list_call, ResourceType};
use crate::server::middleware::Identity;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::Result;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

/// Configure view routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/views/{resource_type}", web::get().to(get_view));
}

/// Query parameters for a read view
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// Parent resource path; required for nested resource types
    pub parent: Option<String>,
}

/// Serve one user's list view of a resource type, cache-first
///
/// A hit serves the stored upstream body verbatim; a miss fetches the list
/// from the upstream and stores it under the user's view key. Invalidation
/// happens on the batch path, never here.
pub async fn get_view(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ResourceType>,
    query: web::Query<ViewQuery>,
) -> Result<HttpResponse> {
    let resource_type = path.into_inner();
    let platform = resource_type.platform();
    let key = view_key(platform, resource_type, identity.user_id);

    if let Some(cached) = state.view_cache.get(&key) {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(cached)));
    }

    debug!(resource_type = %resource_type, "view cache miss, fetching upstream");
    let call = list_call(resource_type, query.parent.as_deref());
    let body = state
        .upstream
        .execute(&identity.bearer_token, &call)
        .await?;

    state.view_cache.put(key, body.clone());
    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}
