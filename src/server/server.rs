//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::batch::BatchOrchestrator;
use crate::core::cache::{CacheInvalidator, ViewCache};
use crate::core::quota::{MemoryQuotaStore, QuotaStore, SqlQuotaStore};
use crate::core::rate_limiter::RateLimiter;
use crate::core::retry::RetryScheduler;
use crate::core::upstream::{HttpUpstream, UpstreamApi};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::Database;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer as ActixHttpServer,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Development quota used when the store runs in memory
const DEV_QUOTA_LIMIT: i64 = 100;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Wires the quota store against the configured database, or an
    /// in-memory store with a uniform development limit when the database
    /// is disabled.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let (quota, database): (Arc<dyn QuotaStore>, Option<Arc<Database>>) =
            if config.database().enabled {
                let database = Arc::new(Database::new(config.database()).await?);
                database.migrate().await?;
                (Arc::new(SqlQuotaStore::new(database.clone())), Some(database))
            } else {
                warn!(
                    "Database disabled, using in-memory quota store with limit {}",
                    DEV_QUOTA_LIMIT
                );
                (
                    Arc::new(MemoryQuotaStore::with_default_limit(DEV_QUOTA_LIMIT)),
                    None,
                )
            };

        let upstream: Arc<dyn UpstreamApi> =
            Arc::new(HttpUpstream::new(config.upstream().clone())?);
        let rate_limiter = RateLimiter::new(config.gateway.rate_limit.clone());
        let view_cache = Arc::new(ViewCache::new(config.gateway.cache.clone()));

        let orchestrator = BatchOrchestrator::new(
            quota.clone(),
            rate_limiter.clone(),
            RetryScheduler::new(config.gateway.retry.clone()),
            upstream.clone(),
            CacheInvalidator::new(view_cache.clone()),
            config.gateway.batch.clone(),
        );

        let state = AppState {
            config: Arc::new(config.clone()),
            quota,
            rate_limiter,
            view_cache,
            upstream,
            orchestrator,
            database,
        };

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);
        }

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "Provisiond")))
            .configure(routes::health::configure_routes)
            .configure(routes::batches::configure_routes)
            .configure(routes::views::configure_routes)
            .configure(routes::quotas::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| {
                GatewayError::Config(format!("Failed to bind to {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::Internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
