//! Role extraction.
//!
//! Acta transcriptions bury officer appointments in free-form keys like
//! `presidente_electo` or `nuevo_representante_legal`. Extraction matches
//! role keywords against the key names and normalizes the attached names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use escriba_core::fact;

use crate::name::normalize_name;

/// Keyword → canonical role label, in match order.
const ROLE_TABLE: &[(&str, &str)] = &[
    ("presidente", "Presidente"),
    ("secretario", "Secretario"),
    ("director", "Director"),
    ("apoderado", "Apoderado"),
    ("representante", "Representante Legal"),
];

/// One person-to-role assignment found in the extracted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Canonical role label.
    pub role: String,
    /// Normalized person name, when the field value was a usable string.
    pub name: Option<String>,
    /// The extracted field the assignment came from.
    pub field_source: String,
}

/// Scan extracted fields for role assignments.
///
/// A field participates when its key contains a role keyword
/// (case-insensitive) and its value is truthy. A key matching several
/// keywords yields one assignment per match. Non-string values keep the
/// assignment but carry no name.
pub fn extract_roles(fields: &serde_json::Map<String, Value>) -> Vec<RoleAssignment> {
    let mut roles = Vec::new();

    for (key, value) in fields {
        if !fact::truthy(value) {
            continue;
        }
        let key_lower = key.to_lowercase();
        for (keyword, label) in ROLE_TABLE {
            if key_lower.contains(keyword) {
                roles.push(RoleAssignment {
                    role: (*label).to_string(),
                    name: value.as_str().and_then(|s| normalize_name(Some(s))),
                    field_source: key.clone(),
                });
            }
        }
    }

    roles
}
