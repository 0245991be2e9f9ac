//! Upstream marketing-platform API access
//!
//! The gateway treats both upstream API families as opaque HTTP backends:
//! a call is a method, a path, and an optional JSON body, executed with the
//! caller's bearer token. The concrete wire shapes live in the resource
//! catalog, not here.

pub mod client;
pub mod error;

pub use client::{HttpUpstream, UpstreamApi};
pub use error::UpstreamError;

use crate::core::catalog::Platform;

/// One upstream HTTP call, ready to execute
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    /// Which API family receives the call
    pub platform: Platform,
    /// HTTP method
    pub method: reqwest::Method,
    /// Path relative to the platform base URL
    pub path: String,
    /// JSON body, if the method carries one
    pub body: Option<serde_json::Value>,
}

impl UpstreamCall {
    /// Create a GET call
    pub fn get(platform: Platform, path: impl Into<String>) -> Self {
        Self {
            platform,
            method: reqwest::Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// Create a POST call with a JSON body
    pub fn post(platform: Platform, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            platform,
            method: reqwest::Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Create a PATCH call with a JSON body
    pub fn patch(platform: Platform, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            platform,
            method: reqwest::Method::PATCH,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Create a PUT call with a JSON body
    pub fn put(platform: Platform, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            platform,
            method: reqwest::Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Create a DELETE call
    pub fn delete(platform: Platform, path: impl Into<String>) -> Self {
        Self {
            platform,
            method: reqwest::Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}
