//! Quota usage endpoint

use crate::server::middleware::Identity;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::{GatewayError, Result};
use actix_web::{web, HttpResponse};

/// Configure quota routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/quotas", web::get().to(get_quotas));
}

/// Full per-feature usage breakdown for the calling user
pub async fn get_quotas(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    let report = state
        .quota
        .usage_report(identity.user_id)
        .await
        .map_err(GatewayError::from)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
