//! HTTP client for the upstream platform APIs

use super::{UpstreamCall, UpstreamError};
use crate::config::UpstreamConfig;
use crate::core::catalog::Platform;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Executes one upstream call with the caller's bearer token
///
/// The orchestrator and the read-view path both go through this seam, so
/// tests can substitute a scripted implementation for the real HTTP client.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Perform the call and return the parsed JSON response body
    async fn execute(
        &self,
        bearer_token: &str,
        call: &UpstreamCall,
    ) -> std::result::Result<serde_json::Value, UpstreamError>;
}

/// Production [`UpstreamApi`] backed by reqwest
pub struct HttpUpstream {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpUpstream {
    /// Create a new upstream client
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(GatewayError::HttpClient)?;
        Ok(Self { client, config })
    }

    fn base_url(&self, platform: Platform) -> &str {
        match platform {
            Platform::Analytics => &self.config.analytics_base_url,
            Platform::TagManager => &self.config.tag_manager_base_url,
        }
    }

    /// Pull a human-readable message out of an upstream error body
    fn error_message(body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(message) = value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return message.to_string();
            }
        }
        body.to_string()
    }
}

#[async_trait]
impl UpstreamApi for HttpUpstream {
    async fn execute(
        &self,
        bearer_token: &str,
        call: &UpstreamCall,
    ) -> std::result::Result<serde_json::Value, UpstreamError> {
        let url = format!(
            "{}{}",
            self.base_url(call.platform).trim_end_matches('/'),
            call.path
        );
        debug!(method = %call.method, %url, "executing upstream call");

        let mut request = self
            .client
            .request(call.method.clone(), &url)
            .bearer_auth(bearer_token);
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| UpstreamError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response.text().await.map_err(|e| UpstreamError::Network {
            message: e.to_string(),
        })?;

        if status.is_success() {
            if body.is_empty() {
                // Deletes commonly return an empty body
                return Ok(serde_json::json!({}));
            }
            serde_json::from_str(&body).map_err(|e| UpstreamError::Api {
                status: status.as_u16(),
                message: format!("invalid response body: {}", e),
            })
        } else {
            Err(UpstreamError::from_status(
                status.as_u16(),
                Self::error_message(&body),
                retry_after,
            ))
        }
    }
}
