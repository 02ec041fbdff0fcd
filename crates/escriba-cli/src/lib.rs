//! # escriba-cli — Command-Line Interface
//!
//! Thin front end over the rule engine and the normalization layer. Each
//! subcommand lives in its own module and exposes a `run_*` function taking
//! parsed arguments and returning an exit code; `main.rs` only parses the
//! command line, configures logging, and dispatches.
//!
//! ## Subcommands
//!
//! - `escriba evaluate` — evaluate a case file against the rule table and
//!   print the result as JSON.
//! - `escriba normalize` — normalize raw extraction output and print the
//!   normalization report.
//! - `escriba rules` — inspect the rule table: a per-type summary, or the
//!   full requirement list of one certificate type.
//!
//! ## Exit Codes
//!
//! - `0` — success; for `evaluate`, the certificate is VALID.
//! - `1` — the certificate is INVALID.
//! - `2` — operational error: unreadable input, malformed JSON, unknown
//!   certificate type.

pub mod bridge;
pub mod evaluate;
pub mod normalize;
pub mod rules;

pub use bridge::{case_input_from_extraction, ACTA_CERTIFICATE_TYPE};
pub use evaluate::{run_evaluate, EvaluateArgs};
pub use normalize::{run_normalize, NormalizeArgs};
pub use rules::{run_rules, RulesArgs};

/// Default rule table filename, resolved against the working directory.
pub const DEFAULT_RULE_TABLE: &str = "legal_rules.json";
