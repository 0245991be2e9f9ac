//! Per-item request validation
//!
//! Validation runs once per item before any network traffic. A failing item
//! is dropped from the working set and recorded as a failed result; it
//! consumes neither quota nor a rate-limit slot.

use crate::core::catalog::{ItemPayload, OperationKind};
use thiserror::Error;

/// Maximum display-name length accepted by either platform
pub const MAX_NAME_LEN: usize = 100;

/// A single item failed validation
#[derive(Debug, Clone, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Which payload field was rejected
    pub field: &'static str,
    /// Why it was rejected
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates and normalizes one batch item against its declared shape
pub struct RequestValidator;

impl RequestValidator {
    /// Normalize the payload in place, then check it for the given operation
    pub fn validate<P: ItemPayload>(
        op: OperationKind,
        item: &mut P,
    ) -> Result<(), ValidationError> {
        item.normalize();
        item.validate(op)
    }
}

/// Require a present, non-empty string field
pub fn require<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::new(field, "field is required")),
    }
}

/// Reject strings longer than `max` characters
pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

/// Reject values outside an allowed set
pub fn one_of(
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("must be one of {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Trim surrounding whitespace from an optional string field
pub fn trim_opt(value: &mut Option<String>) {
    if let Some(v) = value {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}
