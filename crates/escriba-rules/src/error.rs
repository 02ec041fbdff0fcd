//! # Rule Table Errors
//!
//! Error types for loading and evaluating rule tables. Parse errors carry
//! the offending path so a misconfigured table can be located from the
//! error message alone.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a rule table or evaluating a case against it.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The rule table file does not exist.
    #[error("rule table not found: {}", .path.display())]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The rule table file exists but is not valid JSON.
    #[error("failed to parse JSON rule table at {}: {source}", .path.display())]
    JsonParse {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// The rule table file exists but is not valid YAML.
    #[error("failed to parse YAML rule table at {}: {source}", .path.display())]
    YamlParse {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying serde error.
        source: serde_yaml::Error,
    },

    /// The requested certificate type is not defined in the table.
    #[error("unknown certificate type \"{requested}\" (available: {})", .available.join(", "))]
    UnknownCertificateType {
        /// The certificate type that was requested.
        requested: String,
        /// The certificate types the table actually defines, sorted.
        available: Vec<String>,
    },

    /// I/O error while reading a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error outside of table parsing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for rule-table operations.
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let err = RulesError::FileNotFound {
            path: PathBuf::from("/etc/escriba/legal_rules.json"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not found"));
        assert!(msg.contains("legal_rules.json"));
    }

    #[test]
    fn json_parse_display_includes_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RulesError::JsonParse {
            path: PathBuf::from("rules.json"),
            source,
        };
        assert!(format!("{err}").contains("rules.json"));
    }

    #[test]
    fn unknown_certificate_type_lists_available() {
        let err = RulesError::UnknownCertificateType {
            requested: "certificado_x".to_string(),
            available: vec![
                "certificado_firmas".to_string(),
                "certificado_hechos".to_string(),
            ],
        };
        let msg = format!("{err}");
        assert!(msg.contains("certificado_x"));
        assert!(msg.contains("certificado_firmas, certificado_hechos"));
    }

    #[test]
    fn io_error_converts() {
        let err: RulesError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
