//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Per-user rate limiting configuration for upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    /// Requests per minute allowed per user against one upstream family
    #[serde(default = "default_per_user_rpm")]
    pub per_user_rpm: u32,
    /// Maximum time a caller may wait for a token, in milliseconds
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,
}

fn default_rate_limit_enabled() -> bool {
    true
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_user_rpm: default_per_user_rpm(),
            max_wait_ms: default_max_wait_ms(),
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.per_user_rpm != default_per_user_rpm() {
            self.per_user_rpm = other.per_user_rpm;
        }
        if other.max_wait_ms != default_max_wait_ms() {
            self.max_wait_ms = other.max_wait_ms;
        }
        self
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.per_user_rpm == 0 {
            return Err("per_user_rpm cannot be 0 when rate limiting is enabled".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.per_user_rpm, 60);
        assert_eq!(config.max_wait_ms, 10_000);
    }

    #[test]
    fn test_rate_limit_validate_rejects_zero_rpm() {
        let config = RateLimitConfig {
            per_user_rpm: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
