//! Scripted upstream fake
//!
//! Stands in for the two platform APIs. Outcomes are scripted per matcher;
//! a matcher hits when it appears in the call path or the call body, so
//! tests can target individual items by display name.

use async_trait::async_trait;
use parking_lot::Mutex;
use provisiond::core::upstream::{UpstreamApi, UpstreamCall, UpstreamError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

type Scripted = Result<Value, UpstreamError>;

struct Rule {
    matcher: String,
    queue: VecDeque<Scripted>,
}

/// Fake [`UpstreamApi`] with scripted, per-matcher outcomes
///
/// Unmatched calls succeed with an empty body. Scripted outcomes for one
/// matcher are consumed in order, which lets a test script "429 twice,
/// then succeed" for a single item.
#[derive(Default)]
pub struct ScriptedUpstream {
    rules: Mutex<Vec<Rule>>,
    calls: AtomicU32,
    seen_paths: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one outcome for calls matching the given fragment
    pub fn respond(self, matcher: &str, outcome: Scripted) -> Self {
        {
            let mut rules = self.rules.lock();
            match rules.iter_mut().find(|rule| rule.matcher == matcher) {
                Some(rule) => rule.queue.push_back(outcome),
                None => rules.push(Rule {
                    matcher: matcher.to_string(),
                    queue: VecDeque::from([outcome]),
                }),
            }
        }
        self
    }

    /// A 429 outcome
    pub fn rate_limited() -> Scripted {
        Err(UpstreamError::from_status(
            429,
            "Resource has been exhausted".to_string(),
            None,
        ))
    }

    /// A 404 outcome
    pub fn not_found(message: &str) -> Scripted {
        Err(UpstreamError::from_status(404, message.to_string(), None))
    }

    /// A 403 outcome carrying an upstream quota message
    pub fn upstream_quota(message: &str) -> Scripted {
        Err(UpstreamError::from_status(403, message.to_string(), None))
    }

    /// Total number of calls received
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Paths of all calls received, in arrival order
    pub fn seen_paths(&self) -> Vec<String> {
        self.seen_paths.lock().clone()
    }
}

#[async_trait]
impl UpstreamApi for ScriptedUpstream {
    async fn execute(
        &self,
        _bearer_token: &str,
        call: &UpstreamCall,
    ) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_paths.lock().push(call.path.clone());

        let body = call
            .body
            .as_ref()
            .map(|body| body.to_string())
            .unwrap_or_default();

        let mut rules = self.rules.lock();
        for rule in rules.iter_mut() {
            if call.path.contains(&rule.matcher) || body.contains(&rule.matcher) {
                if let Some(outcome) = rule.queue.pop_front() {
                    return outcome;
                }
            }
        }
        Ok(json!({}))
    }
}
