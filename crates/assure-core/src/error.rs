//! # Error Hierarchy
//!
//! Structured error types for the Assure Stack, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each subsystem defines specific error variants that carry diagnostic
//! context: the operation that failed, the value that was rejected, and
//! the expected format.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
/// These errors carry the invalid input so that callers can diagnose
/// malformed catalog data or requests without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Framework identifier is empty or whitespace-only.
    #[error("invalid framework ID: must be non-empty")]
    InvalidFrameworkId,

    /// Control identifier is empty or whitespace-only.
    #[error("invalid control ID: must be non-empty")]
    InvalidControlId,

    /// Question identifier is empty or whitespace-only.
    #[error("invalid question ID: must be non-empty")]
    InvalidQuestionId,

    /// Compliance score outside the closed unit interval.
    #[error("invalid compliance score: {value} (expected a value in [0, 1])")]
    InvalidScore {
        /// The rejected value.
        value: f64,
    },

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_framework_id_display() {
        let err = ValidationError::InvalidFrameworkId;
        let msg = format!("{err}");
        assert!(msg.contains("framework ID"));
        assert!(msg.contains("non-empty"));
    }

    #[test]
    fn validation_error_invalid_score_carries_value() {
        let err = ValidationError::InvalidScore { value: 1.5 };
        let msg = format!("{err}");
        assert!(msg.contains("1.5"));
        assert!(msg.contains("[0, 1]"));
    }

    #[test]
    fn validation_error_invalid_timestamp() {
        let err = ValidationError::InvalidTimestamp {
            value: "not-a-date".to_string(),
            reason: "parse failed".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not-a-date"));
        assert!(msg.contains("parse failed"));
    }

    #[test]
    fn validation_errors_are_debug() {
        let e1 = ValidationError::InvalidControlId;
        let e2 = ValidationError::InvalidQuestionId;
        assert!(!format!("{e1:?}").is_empty());
        assert!(!format!("{e2:?}").is_empty());
    }
}
