//! # Provisiond
//!
//! A quota-aware batch provisioning gateway for marketing-platform APIs.
//! Accepts batches of homogeneous write operations (analytics properties,
//! data streams, conversion events, tag manager containers, workspaces,
//! triggers, variables), enforces per-user subscription quotas and
//! per-platform rate limits, retries rate-limited upstream calls with
//! bounded backoff, and folds every item into a single per-batch response.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use provisiond::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::batch::{
    BatchContext, BatchOrchestrator, BatchRequest, FeatureResponse, ItemResult,
};
pub use core::catalog::{Feature, OperationKind, Platform, ResourcePayload, ResourceType};
pub use core::quota::{QuotaSnapshot, QuotaStore};

use tracing::info;

/// The gateway process: configuration plus a wired HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting provisioning gateway");
        info!("Listening on {}", self.config.server().address());

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build information captured at compile time
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        rust_version: env!("RUST_VERSION"),
    }
}
