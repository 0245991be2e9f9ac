//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.gateway.database
    }

    /// Get upstream platform configuration
    pub fn upstream(&self) -> &UpstreamConfig {
        &self.gateway.upstream
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .validate()
            .map_err(GatewayError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080
database:
  url: "sqlite::memory:"
upstream:
  analytics_base_url: "https://analytics.example.com"
  tag_manager_base_url: "https://tagmanager.example.com"
rate_limit:
  enabled: true
  per_user_rpm: 120
batch:
  max_items: 50
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert!(config.gateway.rate_limit.enabled);
        assert_eq!(config.gateway.rate_limit.per_user_rpm, 120);
        assert_eq!(config.gateway.batch.max_items, 50);
    }

    #[tokio::test]
    async fn test_config_from_file_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server:\n  port: 9000\n").unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9000);
        // Untouched sections fall back to defaults
        assert_eq!(config.gateway.retry.max_retries, 3);
        assert_eq!(config.gateway.retry.base_delay_ms, 1000);
    }

    #[test]
    fn test_config_merge() {
        let base = Config::default();
        let mut override_cfg = Config::default();
        override_cfg.gateway.server.port = 9999;

        let merged = base.merge(override_cfg);
        assert_eq!(merged.server().port, 9999);
    }
}
