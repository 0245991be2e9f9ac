//! HTTP server layer

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use middleware::Identity;
pub use server::HttpServer;
pub use state::AppState;
