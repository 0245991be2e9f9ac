//! Quota-aware batch provisioning
//!
//! A batch is a homogeneous list of write operations against one resource
//! type. The orchestrator admits the whole batch or none of it at intake
//! (de-duplication, subscription quota), then fans items out with bounded
//! concurrency, and finally settles accounting exactly once per batch.

pub mod aggregator;
pub mod orchestrator;
pub mod types;

pub use aggregator::{classify, ItemOutcome, ResultAggregator};
pub use orchestrator::BatchOrchestrator;
pub use types::{BatchContext, BatchRequest, FeatureResponse, ItemResult, ItemState};
