//! Batch orchestration configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Batch orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of items accepted in one batch
    #[serde(default = "default_batch_max_items")]
    pub max_items: usize,
    /// Maximum number of concurrently in-flight items per batch
    #[serde(default = "default_batch_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_items: default_batch_max_items(),
            max_concurrency: default_batch_max_concurrency(),
        }
    }
}

impl BatchConfig {
    /// Merge batch configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_items != default_batch_max_items() {
            self.max_items = other.max_items;
        }
        if other.max_concurrency != default_batch_max_concurrency() {
            self.max_concurrency = other.max_concurrency;
        }
        self
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_items == 0 {
            return Err("max_items cannot be 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency cannot be 0".to_string());
        }
        Ok(())
    }
}
