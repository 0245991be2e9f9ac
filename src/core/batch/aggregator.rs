//! Per-item classification and batch result assembly

use super::types::{FeatureResponse, ItemResult};
use crate::core::upstream::UpstreamError;

/// Terminal outcome of one item, tagged with its input position
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Succeeded {
        id: Option<String>,
        name: String,
    },
    NotFound {
        id: Option<String>,
        name: String,
        message: String,
    },
    LimitReached {
        id: Option<String>,
        name: String,
        message: String,
    },
    Failed {
        id: Option<String>,
        name: String,
        message: String,
    },
}

impl ItemOutcome {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ItemOutcome::Succeeded { .. })
    }
}

/// Classify one finished upstream call into its terminal outcome
///
/// Precedence when several interpretations could apply: not-found and
/// permission-denied first, then platform quota, then everything else as a
/// generic failure. Success requires an Ok body.
pub fn classify(
    name: String,
    payload_id: Option<String>,
    result: Result<serde_json::Value, UpstreamError>,
) -> ItemOutcome {
    match result {
        Ok(body) => ItemOutcome::Succeeded {
            id: extract_resource_path(&body).or(payload_id),
            name,
        },
        Err(err) if err.is_not_found_or_denied() => ItemOutcome::NotFound {
            id: payload_id,
            name,
            message: err.to_string(),
        },
        Err(err) if err.is_upstream_quota() => ItemOutcome::LimitReached {
            id: payload_id,
            name,
            message: err.to_string(),
        },
        Err(err) => ItemOutcome::Failed {
            id: payload_id,
            name,
            message: err.to_string(),
        },
    }
}

// Analytics resources carry their path in "name"; tag manager uses "path".
fn extract_resource_path(body: &serde_json::Value) -> Option<String> {
    body.get("name")
        .or_else(|| body.get("path"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Collects outcomes as the fan-out completes and reassembles them in input
/// order
///
/// Concurrency scrambles completion order; the aggregator restores the
/// caller's ordering so `results[i]` always describes `items[i]`.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: Vec<(usize, ItemOutcome)>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of the item at the given input position
    pub fn push(&mut self, index: usize, outcome: ItemOutcome) {
        self.outcomes.push((index, outcome));
    }

    /// Items that completed successfully so far
    pub fn succeeded_count(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_succeeded())
            .count() as u64
    }

    /// Assemble the batch response, sorted back into input order
    pub fn finish(mut self) -> FeatureResponse {
        self.outcomes.sort_by_key(|(index, _)| *index);

        let mut errors = Vec::new();
        let mut results = Vec::with_capacity(self.outcomes.len());
        let mut limit_reached = false;
        let mut not_found_error = false;

        for (_, outcome) in self.outcomes {
            match outcome {
                ItemOutcome::Succeeded { id, name } => {
                    results.push(ItemResult::succeeded(id, name));
                }
                ItemOutcome::NotFound { id, name, message } => {
                    not_found_error = true;
                    errors.push(message.clone());
                    results.push(ItemResult::not_found(id, name, message));
                }
                ItemOutcome::LimitReached { id, name, message } => {
                    limit_reached = true;
                    errors.push(message.clone());
                    results.push(ItemResult::limit_reached(id, name, message));
                }
                ItemOutcome::Failed { id, name, message } => {
                    errors.push(message.clone());
                    results.push(ItemResult::failed(id, name, message));
                }
            }
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        let success = !results.is_empty() && succeeded == results.len();
        let message = if success {
            format!("{} item(s) processed successfully", succeeded)
        } else {
            format!(
                "{} of {} item(s) processed successfully",
                succeeded,
                results.len()
            )
        };

        FeatureResponse {
            success,
            limit_reached,
            not_found_error,
            message,
            errors,
            results,
        }
    }
}
