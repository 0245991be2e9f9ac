//! Upstream platform configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Upstream marketing-platform API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the analytics API family
    #[serde(default = "default_analytics_base_url")]
    pub analytics_base_url: String,
    /// Base URL for the tag manager API family
    #[serde(default = "default_tag_manager_base_url")]
    pub tag_manager_base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_analytics_base_url() -> String {
    "https://analyticsadmin.googleapis.com".to_string()
}

fn default_tag_manager_base_url() -> String {
    "https://tagmanager.googleapis.com".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            analytics_base_url: default_analytics_base_url(),
            tag_manager_base_url: default_tag_manager_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    /// Merge upstream configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.analytics_base_url != default_analytics_base_url() {
            self.analytics_base_url = other.analytics_base_url;
        }
        if other.tag_manager_base_url != default_tag_manager_base_url() {
            self.tag_manager_base_url = other.tag_manager_base_url;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        self
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.analytics_base_url.is_empty() {
            return Err("Analytics base URL cannot be empty".to_string());
        }
        if self.tag_manager_base_url.is_empty() {
            return Err("Tag manager base URL cannot be empty".to_string());
        }
        Ok(())
    }
}
