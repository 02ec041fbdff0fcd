//! # escriba-rules — Rule Table & Decision Engine
//!
//! Deterministic compliance evaluation for notarial certificates. A
//! [`RuleTable`] is external configuration (JSON or YAML) describing, per
//! certificate type, the requirements a certificate must satisfy and the
//! statutory basis for each. [`evaluate`] checks a case's facts against
//! those requirements and produces an [`EvaluationResult`]: a VALID/INVALID
//! verdict, structured findings with operator-facing Spanish messages, and
//! the deduplicated list of legal citations that were consulted.
//!
//! ## Evaluation Model
//!
//! ```text
//! RuleTable × (facts, conditions, global_fields) → EvaluationResult
//! ```
//!
//! Evaluation is a pure function: no clock, no I/O, no mutation of inputs.
//! Two calls with the same table and case produce identical results,
//! finding order included. The engine knows no statute by name — every
//! article number, literal, and requirement id comes from the table, so
//! counsel can amend the rules without a recompile.

pub mod citation;
pub mod engine;
pub mod error;
pub mod table;

// Re-export primary types.
pub use engine::{
    evaluate, evaluate_case, CaseInput, CertificateStatus, EvaluationResult, Finding, FindingKind,
};
pub use error::{RulesError, RulesResult};
pub use table::{CertificateTypeRules, Requirement, RuleTable};
