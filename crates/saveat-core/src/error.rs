//! # Domain Validation Errors
//!
//! Structured errors for domain-level validation in `saveat-core`.

use thiserror::Error;

/// Errors from validating domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or missing.
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    /// A numeric field is outside its allowed range.
    #[error("field '{field}' out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: String,
    },

    /// An enum field carries a value outside its allowed set.
    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = ValidationError::MissingField("email");
        assert!(format!("{err}").contains("email"));
    }

    #[test]
    fn out_of_range_display() {
        let err = ValidationError::OutOfRange {
            field: "quantity_available",
            reason: "must not be negative".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("quantity_available"));
        assert!(msg.contains("negative"));
    }

    #[test]
    fn invalid_value_display() {
        let err = ValidationError::InvalidValue {
            field: "status",
            value: "vendido".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("status"));
        assert!(msg.contains("vendido"));
    }
}
