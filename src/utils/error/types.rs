//! Error types for the gateway

use crate::core::quota::QuotaError;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
///
/// Item-level upstream failures never surface here: the batch orchestrator
/// folds them into per-item results. This type carries configuration and
/// infrastructure failures plus the batch-level pre-flight rejections
/// (missing subscription, duplicate identity, malformed request).
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authorization errors (no active subscription, missing identity)
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request errors (duplicate identity, oversized batch, unknown resource)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

// Used by the read-view routes, where one upstream call backs the whole
// response. Batch items never take this path.
impl From<crate::core::upstream::UpstreamError> for GatewayError {
    fn from(err: crate::core::upstream::UpstreamError) -> Self {
        use crate::core::upstream::UpstreamError;
        match err {
            UpstreamError::NotFound { message } => GatewayError::NotFound(message),
            UpstreamError::PermissionDenied { message } => GatewayError::Authorization(message),
            other => GatewayError::Internal(format!("upstream: {}", other)),
        }
    }
}

impl From<QuotaError> for GatewayError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::SubscriptionNotFound { user_id } => GatewayError::Authorization(format!(
                "no active subscription for user {}",
                user_id
            )),
            QuotaError::Store(msg) => GatewayError::Internal(format!("quota store: {}", msg)),
            QuotaError::Database(db) => GatewayError::Database(db),
        }
    }
}
