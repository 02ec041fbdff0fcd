//! # escriba-core — Foundational Types
//!
//! Shared building blocks for the Escriba stack: the [`FactValue`] model that
//! absorbs heterogeneous extraction output, identifier newtypes for Uruguayan
//! tax and civil IDs, issuing-institution detection, and the structured error
//! hierarchy.
//!
//! ## Design Principles
//!
//! 1. **Parse, don't validate**: identifiers are newtypes whose constructors
//!    reject malformed input. Once constructed they are canonical — no
//!    downstream code re-checks digit counts.
//! 2. **One seam for messy input**: every "is this fact present?" question is
//!    answered by [`FactValue`], never by ad-hoc truthiness checks scattered
//!    across the rule engine.
//! 3. **Determinism**: no global state, no clocks, no randomness. The same
//!    input always produces the same answer.

#![deny(missing_docs)]

pub mod error;
pub mod fact;
pub mod identity;
pub mod institution;

// Re-export primary types.
pub use error::{CoreError, ValidationError};
pub use fact::{FactDetail, FactValue};
pub use identity::{Cedula, Rut};
pub use institution::Institution;
