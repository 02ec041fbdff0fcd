//! # Issuing Institutions — Single Source of Truth
//!
//! Defines the [`Institution`] enum for every issuer whose certificates flow
//! through the practice. This is the single definition used by every crate
//! in the workspace: the normalizer detects institutions from document
//! headers, the registry aggregates certificate history by them, and the
//! compiler enforces that a new issuer is handled everywhere at once.

use serde::{Deserialize, Serialize};

/// An institution that issues (or receives) the certificates handled by the
/// practice.
///
/// Serialized as the uppercase code (`"DGI"`, `"BPS"`, ...), matching the
/// labels stored in existing registry snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Institution {
    /// Dirección General Impositiva — tax registration and standing.
    Dgi,
    /// Banco de Previsión Social — social security standing.
    Bps,
    /// Ministerio de Salud Pública — health registrations.
    Msp,
    /// Banco Central del Uruguay — financial standing.
    Bcu,
    /// Abitab — payment-network receipts and attestations.
    Abitab,
    /// The notarial practice itself — actas and certificates it issues.
    Notaria,
}

/// Detection keywords per institution, in priority order. Containment is
/// checked against the uppercased input, so keywords are stored uppercase
/// and unaccented — OCR output rarely preserves accents anyway.
const KEYWORDS: &[(Institution, &[&str])] = &[
    (Institution::Dgi, &["DGI", "DIRECCION GENERAL IMPOSITIVA"]),
    (Institution::Bps, &["BPS", "BANCO DE PREVISION SOCIAL"]),
    (Institution::Msp, &["MSP", "MINISTERIO DE SALUD PUBLICA"]),
    (Institution::Bcu, &["BCU", "BANCO CENTRAL"]),
    (Institution::Abitab, &["ABITAB"]),
    (Institution::Notaria, &["NOTARIA", "ESCRIBANO", "ACTA"]),
];

impl Institution {
    /// Return all institutions as a slice, in detection-priority order.
    pub fn all() -> &'static [Institution] {
        &[
            Self::Dgi,
            Self::Bps,
            Self::Msp,
            Self::Bcu,
            Self::Abitab,
            Self::Notaria,
        ]
    }

    /// The total number of institutions.
    pub const COUNT: usize = 6;

    /// Detect the issuing institution from free text — a document-type
    /// header, a filename, an OCR fragment.
    ///
    /// Keyword containment over the uppercased input; the first match in
    /// priority order wins. NOTARIA is checked last so that "ACTA" in a
    /// header does not shadow an institutional keyword appearing alongside.
    pub fn detect(text: &str) -> Option<Institution> {
        let upper = text.to_uppercase();
        KEYWORDS.iter().find_map(|(institution, keys)| {
            keys.iter()
                .any(|k| upper.contains(k))
                .then_some(*institution)
        })
    }

    /// The short uppercase code, as stored in registry records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dgi => "DGI",
            Self::Bps => "BPS",
            Self::Msp => "MSP",
            Self::Bcu => "BCU",
            Self::Abitab => "ABITAB",
            Self::Notaria => "NOTARIA",
        }
    }
}

impl std::fmt::Display for Institution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
