//! Retry configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Retry configuration for single upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retries after the initial attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds, doubled per attempt
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Maximum additive jitter in milliseconds
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

impl RetryConfig {
    /// Merge retry configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_retries != default_max_retries() {
            self.max_retries = other.max_retries;
        }
        if other.base_delay_ms != default_base_delay_ms() {
            self.base_delay_ms = other.base_delay_ms;
        }
        if other.max_jitter_ms != default_max_jitter_ms() {
            self.max_jitter_ms = other.max_jitter_ms;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay_ms, 1000);
        assert_eq!(config.max_jitter_ms, 200);
    }

    #[test]
    fn test_retry_config_deserialization_partial() {
        let json = r#"{"max_retries": 7}"#;
        let config: RetryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_retries, 7);
        assert_eq!(config.base_delay_ms, 1000);
    }
}
