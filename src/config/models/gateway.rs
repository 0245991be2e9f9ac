//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upstream platform configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
    /// Batch orchestration configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Read-view cache configuration
    #[serde(default)]
    pub cache: ViewCacheConfig,
}

impl GatewayConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::GatewayError::Config(format!(
                    "Invalid GATEWAY_PORT: {}",
                    port
                ))
            })?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.database = self.database.merge(other.database);
        self.upstream = self.upstream.merge(other.upstream);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self.retry = self.retry.merge(other.retry);
        self.batch = self.batch.merge(other.batch);
        self.cache = self.cache.merge(other.cache);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server
            .validate()
            .map_err(|e| format!("Server config error: {}", e))?;
        self.database
            .validate()
            .map_err(|e| format!("Database config error: {}", e))?;
        self.upstream
            .validate()
            .map_err(|e| format!("Upstream config error: {}", e))?;
        self.rate_limit
            .validate()
            .map_err(|e| format!("Rate limit config error: {}", e))?;
        self.batch
            .validate()
            .map_err(|e| format!("Batch config error: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_config_merge_sections() {
        let base = GatewayConfig::default();
        let other = GatewayConfig {
            batch: BatchConfig {
                max_items: 25,
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.batch.max_items, 25);
        assert_eq!(merged.server.port, 8000);
    }
}
