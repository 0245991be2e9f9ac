//! Integration tests

pub mod orchestrator_tests;
pub mod quota_tests;
