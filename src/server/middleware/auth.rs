//! Caller identity extraction
//!
//! Every provisioning route needs two things from the caller: the dashboard
//! user id (quota and rate-limit key) and the upstream bearer token, passed
//! through verbatim. Token validity is the upstream's concern; an invalid
//! token surfaces as a per-item permission failure, not a gateway 401.

use crate::utils::GatewayError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

/// Header carrying the acting dashboard user
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated caller of one request
#[derive(Debug, Clone)]
pub struct Identity {
    /// Acting dashboard user
    pub user_id: Uuid,
    /// Upstream bearer token, without the "Bearer " prefix
    pub bearer_token: String,
}

fn extract_identity(req: &HttpRequest) -> Result<Identity, GatewayError> {
    let authorization = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| GatewayError::Authorization("missing Authorization header".to_string()))?;

    let bearer_token = authorization
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            GatewayError::Authorization("Authorization header must be a bearer token".to_string())
        })?
        .to_string();

    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| GatewayError::Authorization(format!("missing {} header", USER_ID_HEADER)))?;
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| GatewayError::Authorization(format!("{} must be a UUID", USER_ID_HEADER)))?;

    Ok(Identity {
        user_id,
        bearer_token,
    })
}

impl FromRequest for Identity {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req))
    }
}
