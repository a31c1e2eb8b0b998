//! Domain models for the vet-clinic system.
//!
//! Every entity validates all of its fields when it is built and again on
//! each `set_*` call. A failed setter leaves the previous value in place.

mod appointment;
mod client;
mod pet;
mod veterinarian;

pub use appointment::*;
pub use client::*;
pub use pet::*;
pub use veterinarian::*;

use thiserror::Error;

/// A field value that violates its invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable reason
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Identifiers and foreign keys must be strictly positive.
pub(crate) fn positive_id(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value <= 0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    Ok(value)
}

/// Trimmed text that must not be blank.
pub(crate) fn required_text(field: &'static str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text that may be empty.
pub(crate) fn free_text(value: &str) -> String {
    value.trim().to_string()
}

/// Trimmed optional text; blank collapses to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Empty, or anything containing `@`. The check runs before trimming.
pub(crate) fn email_address(field: &'static str, value: &str) -> ValidationResult<String> {
    if !value.is_empty() && !value.contains('@') {
        return Err(ValidationError::new(field, "must contain '@'"));
    }
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_id() {
        assert_eq!(positive_id("id", 1), Ok(1));
        assert!(positive_id("id", 0).is_err());
        assert!(positive_id("id", -4).is_err());
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Max "), Ok("Max".to_string()));
        let err = required_text("name", "   ").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" Main St ")), Some("Main St".into()));
    }

    #[test]
    fn test_email_address() {
        assert_eq!(email_address("email", ""), Ok(String::new()));
        assert_eq!(email_address("email", " a@b.cl "), Ok("a@b.cl".into()));
        assert!(email_address("email", "not-an-email").is_err());
        assert!(email_address("email", "   ").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ValidationError::new("age", "must not be negative");
        assert_eq!(err.to_string(), "invalid age: must not be negative");
    }
}
