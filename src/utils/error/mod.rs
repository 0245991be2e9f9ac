//! Error handling for the gateway

pub mod response;
pub mod types;

pub use types::{GatewayError, Result};
