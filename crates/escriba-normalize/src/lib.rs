//! # escriba-normalize — Field Normalization
//!
//! Turns the messy, inconsistently formatted fields that come out of
//! document extraction into canonical values the decision engine and the
//! registry can rely on.
//!
//! ## Pipeline
//!
//! [`normalize_record`] drives the whole layer: it takes an
//! [`ExtractedRecord`] straight off the extraction output and produces a
//! [`NormalizationReport`] with canonical fields plus everything that went
//! wrong along the way (missing required fields, malformed identifiers,
//! dates that could not be parsed).
//!
//! Normalization never fails. A value that cannot be canonicalized is
//! passed through as-is and reported as an issue, so downstream consumers
//! always receive the full record and decide for themselves how much to
//! trust each field.
//!
//! The individual normalizers ([`normalize_name`], [`normalize_date`],
//! [`normalize_rut`], [`normalize_cedula`], [`extract_roles`]) are also
//! usable on their own.

pub mod date;
pub mod ids;
pub mod name;
pub mod record;
pub mod roles;

pub use date::{normalize_date, DateConfidence, NormalizedDate};
pub use ids::{normalize_cedula, normalize_rut};
pub use name::normalize_name;
pub use record::{
    normalize_record, ExtractedRecord, FieldIssue, NormalizationReport, NormalizedFields,
    ReportMetadata,
};
pub use roles::{extract_roles, RoleAssignment};
