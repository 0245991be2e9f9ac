//! Shared utilities for the gateway

pub mod error;

pub use error::{GatewayError, Result};
