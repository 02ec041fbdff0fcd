//! Record-level normalization.
//!
//! Ties the field normalizers together: one [`ExtractedRecord`] in, one
//! [`NormalizationReport`] out. The report carries the canonical fields
//! next to the issue lists, so a caller can render a clean record and
//! still show every doubt the normalizers had about it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use escriba_core::Institution;

use crate::date::{normalize_date, DateConfidence, NormalizedDate};
use crate::ids::{normalize_cedula, normalize_rut};
use crate::name::normalize_name;
use crate::roles::{extract_roles, RoleAssignment};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One certificate as it comes out of document extraction.
///
/// Field names match the extraction output, which keeps the source
/// documents' Spanish labels. Every field is optional; extraction emits
/// whatever it managed to read. Keys this struct does not know are
/// ignored, except `other_fields`, which the extractor itself uses as the
/// catch-all for labels it cannot classify.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Document type line, e.g. `"Certificado único DGI"`.
    #[serde(default)]
    pub document_type: Option<String>,
    /// Company or person name as printed.
    #[serde(default)]
    pub denominacion: Option<String>,
    /// Taxpayer number as printed.
    #[serde(default)]
    pub rut: Option<String>,
    /// Cédula as printed.
    #[serde(default)]
    pub ci: Option<String>,
    /// Certificate serial.
    #[serde(default)]
    pub constancia_number: Option<String>,
    /// Registered fiscal address.
    #[serde(default)]
    pub domicilio_fiscal: Option<String>,
    /// Taxpayer classification.
    #[serde(default)]
    pub tipo_contribuyente: Option<String>,
    /// Status line, e.g. `"VIGENTE"`.
    #[serde(default)]
    pub estado: Option<String>,
    /// Main document date.
    #[serde(default)]
    pub fecha: Option<String>,
    /// Issue date, when the document distinguishes it from `fecha`.
    #[serde(default)]
    pub emision: Option<String>,
    /// Expiry date.
    #[serde(default)]
    pub vencimiento: Option<String>,
    /// Everything the extractor read but could not classify.
    #[serde(default)]
    pub other_fields: serde_json::Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The canonical fields of a record after normalization.
///
/// Serialized with explicit nulls: consumers parse a fixed shape and a
/// missing field looks different from an omitted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFields {
    /// Document type, passed through untouched.
    pub document_type: Option<String>,
    /// Title-cased company or person name.
    pub company_name: Option<String>,
    /// RUT as `XX-XXXXXX-XXX-X`, or the raw value when malformed.
    pub rut: Option<String>,
    /// Cédula as `X.XXX.XXX-X`, or the raw value when malformed.
    pub ci: Option<String>,
    /// Certificate serial, passed through untouched.
    pub certificate_number: Option<String>,
    /// Fiscal address, passed through untouched.
    pub fiscal_address: Option<String>,
    /// Taxpayer classification, passed through untouched.
    pub taxpayer_type: Option<String>,
    /// Status line, passed through untouched.
    pub status: Option<String>,
    /// Normalized main document date.
    pub date: NormalizedDate,
    /// Normalized issue date.
    pub issue_date: NormalizedDate,
    /// Normalized expiry date.
    pub expiry_date: NormalizedDate,
    /// Issuing institution inferred from the document type.
    pub institution: Option<Institution>,
    /// Role assignments found in the unclassified fields.
    pub roles: Vec<RoleAssignment>,
    /// The unclassified fields, passed through untouched.
    pub other_fields: serde_json::Map<String, Value>,
}

/// One doubtful field: what it was called, what it said, why it is
/// doubtful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Output field name.
    pub field: String,
    /// The value as extracted.
    pub value: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Counters and timestamp for one normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When normalization ran.
    pub normalized_at: DateTime<Utc>,
    /// Length of the `conflicts` list.
    pub total_conflicts: usize,
    /// Length of the `missing` list.
    pub total_missing: usize,
    /// Length of the `low_confidence` list.
    pub total_low_confidence: usize,
}

/// The full output of [`normalize_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Canonical field values.
    pub normalized_fields: NormalizedFields,
    /// Contradictions between fields. No current normalizer detects one;
    /// the lane is part of the report shape.
    pub conflicts: Vec<FieldIssue>,
    /// Required fields that were absent or empty.
    pub missing: Vec<String>,
    /// Fields that were present but doubtful.
    pub low_confidence: Vec<FieldIssue>,
    /// Run counters and timestamp.
    pub metadata: ReportMetadata,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Fields a usable record must carry.
const REQUIRED_FIELDS: &[&str] = &["document_type", "denominacion", "fecha"];

/// Normalize one extracted record.
///
/// Never fails: malformed values pass through verbatim and show up in
/// `low_confidence`, absent required fields show up in `missing`. Issue
/// order is fixed (identifiers first, then the three dates), so reports
/// diff cleanly across runs.
pub fn normalize_record(record: &ExtractedRecord) -> NormalizationReport {
    let conflicts: Vec<FieldIssue> = Vec::new();
    let mut missing = Vec::new();
    let mut low_confidence = Vec::new();

    let required_values = [&record.document_type, &record.denominacion, &record.fecha];
    for (label, value) in REQUIRED_FIELDS.iter().zip(required_values) {
        if value.as_deref().map_or(true, str::is_empty) {
            missing.push((*label).to_string());
        }
    }

    let (rut, rut_issue) = normalize_rut(record.rut.as_deref());
    low_confidence.extend(rut_issue);
    let (ci, ci_issue) = normalize_cedula(record.ci.as_deref());
    low_confidence.extend(ci_issue);

    let date = normalize_date(record.fecha.as_deref());
    let issue_date = normalize_date(record.emision.as_deref());
    let expiry_date = normalize_date(record.vencimiento.as_deref());
    let dates = [
        ("date", &date),
        ("issue_date", &issue_date),
        ("expiry_date", &expiry_date),
    ];
    for (label, value) in dates {
        if value.confidence == DateConfidence::Low {
            low_confidence.push(FieldIssue {
                field: label.to_string(),
                value: value.original.clone().unwrap_or_default(),
                reason: "Could not parse date format".to_string(),
            });
        }
    }

    let normalized_fields = NormalizedFields {
        document_type: record.document_type.clone(),
        company_name: normalize_name(record.denominacion.as_deref()),
        rut,
        ci,
        certificate_number: record.constancia_number.clone(),
        fiscal_address: record.domicilio_fiscal.clone(),
        taxpayer_type: record.tipo_contribuyente.clone(),
        status: record.estado.clone(),
        date,
        issue_date,
        expiry_date,
        institution: record.document_type.as_deref().and_then(Institution::detect),
        roles: extract_roles(&record.other_fields),
        other_fields: record.other_fields.clone(),
    };

    tracing::debug!(
        missing = missing.len(),
        low_confidence = low_confidence.len(),
        institution = ?normalized_fields.institution,
        "normalized record"
    );

    let metadata = ReportMetadata {
        normalized_at: Utc::now(),
        total_conflicts: conflicts.len(),
        total_missing: missing.len(),
        total_low_confidence: low_confidence.len(),
    };

    NormalizationReport {
        normalized_fields,
        conflicts,
        missing,
        low_confidence,
        metadata,
    }
}
