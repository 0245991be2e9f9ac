//! Core gateway logic

pub mod batch;
pub mod cache;
pub mod catalog;
pub mod quota;
pub mod rate_limiter;
pub mod retry;
pub mod upstream;
pub mod validation;
