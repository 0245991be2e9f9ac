//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// Falls back to defaults plus environment overrides when the configuration
/// file is absent, so a bare checkout still starts in development mode.
pub async fn run_server() -> Result<()> {
    let config_path = "config/gateway.yaml";

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Loaded configuration from {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file {} not loaded ({}), using defaults with environment overrides",
                config_path, e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at http://{}",
        config.server().address()
    );
    info!("API endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /health/detailed - Health with database and cache detail");
    info!("   POST /api/v1/batches - Submit a provisioning batch");
    info!("   GET  /api/v1/views/{{resourceType}} - Cached upstream list view");
    info!("   GET  /api/v1/quotas - Per-feature usage report");

    server.start().await
}
