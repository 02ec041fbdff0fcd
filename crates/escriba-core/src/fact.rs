//! # Fact Values
//!
//! Extraction output is messy: the same logical fact arrives as a bare
//! boolean, as a structured map (`{"presente": true, "vencido": false}`), or
//! as free-form JSON. [`FactValue`] is the single seam where that variability
//! is absorbed. The rule engine only ever asks two questions — "is it
//! present?" and "is it expired?" — and both are answered here, nowhere else.
//!
//! ## Expiration Is Three-Valued
//!
//! Presence collapses to a boolean, but expiration does not: a fact that
//! carries no expiration flag has *unknown* expiry, and [`FactValue::expiration`]
//! returns `None` for it. Collapsing unknown to "expired" would fail
//! certificates on evidence nobody asserted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// FactDetail
// ---------------------------------------------------------------------------

/// Structured form of a fact: presence and expiration flags plus whatever
/// else the extractor attached.
///
/// `presente`/`vencido` are the canonical keys. `present`/`expired` are
/// accepted because early extraction runs emitted English names; the Spanish
/// key wins when both appear.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FactDetail {
    /// Presence flag (canonical key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presente: Option<bool>,

    /// Presence flag (legacy key). Consulted only when `presente` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,

    /// Expiration flag (canonical key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vencido: Option<bool>,

    /// Expiration flag (legacy key). Consulted only when `vencido` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,

    /// Any additional keys the extractor attached (dates, notes, source
    /// spans). Preserved verbatim and round-tripped on serialization.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl FactDetail {
    /// The presence flag, if either spelling is set.
    pub fn presence(&self) -> Option<bool> {
        self.presente.or(self.present)
    }

    /// The expiration flag, if either spelling is set.
    pub fn expiration(&self) -> Option<bool> {
        self.vencido.or(self.expired)
    }

    /// Fallback when no presence flag is set: a detail map with any keys at
    /// all counts as present, an empty map does not.
    fn is_truthy(&self) -> bool {
        self.presente.is_some()
            || self.present.is_some()
            || self.vencido.is_some()
            || self.expired.is_some()
            || !self.extra.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FactValue
// ---------------------------------------------------------------------------

/// A single fact about a certificate, as asserted by an upstream extractor.
///
/// Deserialization is untagged: booleans become [`FactValue::Flag`], JSON
/// objects become [`FactValue::Detail`], and everything else (strings,
/// numbers, arrays, null) is kept verbatim as [`FactValue::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Bare boolean assertion.
    Flag(bool),

    /// Structured assertion with presence/expiration flags.
    Detail(FactDetail),

    /// Anything else the extractor produced.
    Raw(Value),
}

impl FactValue {
    /// Whether this fact asserts presence.
    ///
    /// - [`Flag`](Self::Flag): the boolean itself.
    /// - [`Detail`](Self::Detail): the presence flag when set, otherwise the
    ///   map's truthiness (non-empty means present).
    /// - [`Raw`](Self::Raw): JSON truthiness via [`truthy`].
    pub fn is_present(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Detail(d) => d.presence().unwrap_or_else(|| d.is_truthy()),
            Self::Raw(v) => truthy(v),
        }
    }

    /// Whether this fact asserts expiration.
    ///
    /// Only structured details carry an expiration flag; for every other
    /// shape the answer is unknown and `None` is returned.
    pub fn expiration(&self) -> Option<bool> {
        match self {
            Self::Detail(d) => d.expiration(),
            _ => None,
        }
    }

    /// Whether this fact is an explicit JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }
}

/// Presence of an optional fact: a fact that was never asserted is absent.
pub fn presence(value: Option<&FactValue>) -> bool {
    value.is_some_and(FactValue::is_present)
}

/// JSON truthiness as the extraction pipeline's consumers have always read
/// it: null, `false`, zero, the empty string, and empty collections are
/// false; everything else is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
