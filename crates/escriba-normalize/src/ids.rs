//! RUT and cédula canonicalization.
//!
//! Wraps the core identifier types with the pass-through policy of this
//! layer: a malformed identifier is returned as extracted and flagged as
//! an issue, never dropped. The caller always gets the value back.

use escriba_core::{Cedula, Rut};

use crate::record::FieldIssue;

/// Normalize a RUT to `XX-XXXXXX-XXX-X`.
///
/// A value that does not contain exactly 12 digits is returned verbatim
/// together with a [`FieldIssue`] naming the digit count. Absent, empty,
/// or literal-`"null"` input yields neither value nor issue.
pub fn normalize_rut(raw: Option<&str>) -> (Option<String>, Option<FieldIssue>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    if raw.is_empty() || raw == "null" {
        return (None, None);
    }

    match Rut::new(raw) {
        Ok(rut) => (Some(rut.formatted()), None),
        Err(_) => {
            let digits = raw.chars().filter(char::is_ascii_digit).count();
            let issue = FieldIssue {
                field: "rut".to_string(),
                value: raw.to_string(),
                reason: format!("Unexpected RUT length: {digits} digits"),
            };
            (Some(raw.to_string()), Some(issue))
        }
    }
}

/// Normalize a cédula to `X.XXX.XXX-X`.
///
/// Seven-digit input gets a verifier digit appended; anything other than
/// seven or eight digits is returned verbatim with a [`FieldIssue`].
pub fn normalize_cedula(raw: Option<&str>) -> (Option<String>, Option<FieldIssue>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    if raw.is_empty() || raw == "null" {
        return (None, None);
    }

    match Cedula::new(raw) {
        Ok(cedula) => (Some(cedula.formatted()), None),
        Err(_) => {
            let digits = raw.chars().filter(char::is_ascii_digit).count();
            let issue = FieldIssue {
                field: "ci".to_string(),
                value: raw.to_string(),
                reason: format!("Unexpected CI length: {digits} digits"),
            };
            (Some(raw.to_string()), Some(issue))
        }
    }
}
