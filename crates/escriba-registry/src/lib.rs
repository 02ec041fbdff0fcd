//! # escriba-registry — Customer & Certificate Registry
//!
//! In-memory model of a notarial practice's document archive: one folder
//! per customer, one file per certificate, with the notary's own
//! convention that an `ERROR` filename prefix marks a certificate they
//! rejected.
//!
//! The crate does no file I/O. Callers walk the archive however they
//! like, feed names and paths through the [`classify`] heuristics, and
//! assemble a [`model::CustomerRegistry`]; [`tracker::CertificateTracker`]
//! then answers history and error-pattern queries over it. Identifiers
//! are short content digests, so re-indexing the same archive always
//! produces the same ids.

pub mod classify;
pub mod model;
pub mod tracker;

pub use classify::{certificate_state_from_filename, date_from_filename, is_certificate_filename};
pub use model::{
    derive_certificate_id, derive_customer_id, CertificateRecord, CertificateState, Customer,
    CustomerKind, CustomerRegistry,
};
pub use tracker::{
    CertificateTracker, CustomerErrorCount, CustomerSummary, ErrorReport, InstitutionStats,
    RecentCertificate, TimelineAnalysis,
};
