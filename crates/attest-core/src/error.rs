//! # Error Hierarchy
//!
//! Structured error types for the foundational crate, built with
//! `thiserror`. Each variant carries enough context to diagnose a failure
//! without a debugger: the rejected value and the expected format.

use thiserror::Error;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Claim values must be strings, integers, booleans, or nulls.
    #[error("float values are not permitted in canonical representations; use string or integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// DID does not conform to W3C DID syntax (did:method:identifier).
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),

    /// Subject identifier is empty or exceeds the length cap.
    #[error("invalid subject id: \"{0}\" (expected 1-255 non-whitespace characters)")]
    InvalidSubjectId(String),

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
    fn canonicalization_error_float_rejected_display() {
        let err = CanonicalizationError::FloatRejected(3.14);
        let msg = format!("{err}");
        assert!(msg.contains("float values are not permitted"));
        assert!(msg.contains("3.14"));
    }

    #[test]
    fn validation_error_invalid_did_display() {
        let err = ValidationError::InvalidDid("bad:did".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("bad:did"));
        assert!(msg.contains("did:<method>:<identifier>"));
    }

    #[test]
    fn validation_error_invalid_subject_id_display() {
        let err = ValidationError::InvalidSubjectId("".to_string());
        assert!(format!("{err}").contains("1-255"));
    }

    #[test]
    fn validation_error_invalid_timestamp_display() {
        let err = ValidationError::InvalidTimestamp {
            value: "not-a-date".to_string(),
            reason: "parse failed".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not-a-date"));
        assert!(msg.contains("parse failed"));
    }

    #[test]
    fn all_error_types_are_debug() {
        let e1 = CanonicalizationError::FloatRejected(0.0);
        let e2 = ValidationError::InvalidSubjectId("x".to_string());
        assert!(!format!("{e1:?}").is_empty());
        assert!(!format!("{e2:?}").is_empty());
    }
}
