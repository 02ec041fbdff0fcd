//! # Error Hierarchy
//!
//! Structured error types for the core crate, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors carry the rejected input and the expected format so
//! that a mangled OCR read can be diagnosed from the error message alone.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// RUT does not contain exactly 12 digits.
    #[error("invalid RUT: \"{0}\" (expected 12 digits, optionally as XX-XXXXXX-XXX-X)")]
    InvalidRut(String),

    /// Cédula does not contain 7 or 8 digits.
    #[error("invalid cédula: \"{0}\" (expected 7 or 8 digits, optionally as X.XXX.XXX-X)")]
    InvalidCedula(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_validation_display() {
        let inner = ValidationError::InvalidRut("12-34".to_string());
        let err = CoreError::Validation(inner);
        let msg = format!("{err}");
        assert!(msg.contains("validation error"));
        assert!(msg.contains("12-34"));
    }

    #[test]
    fn core_error_json_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CoreError::Json(json_err);
        assert!(format!("{err}").contains("JSON error"));
    }

    #[test]
    fn validation_error_invalid_rut() {
        let err = ValidationError::InvalidRut("abc".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("abc"));
        assert!(msg.contains("12 digits"));
    }

    #[test]
    fn validation_error_invalid_cedula() {
        let err = ValidationError::InvalidCedula("12345".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("12345"));
        assert!(msg.contains("7 or 8 digits"));
    }

    #[test]
    fn validation_error_converts_to_core_error() {
        let err: CoreError = ValidationError::InvalidCedula("x".to_string()).into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
