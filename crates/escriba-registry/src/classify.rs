//! Filename and name heuristics.
//!
//! Everything the practice knows about a certificate before opening the
//! file is encoded in how they name things: the `ERROR` prefix for
//! rejected certificates, dates embedded in filenames, company suffixes
//! in folder names. These functions are pure text analysis; the caller
//! owns the filesystem walk.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

use crate::model::{CertificateState, CustomerKind};

/// Name fragments that mark a folder as a company.
const COMPANY_KEYWORDS: &[&str] = &[
    "sociedad",
    "anónima",
    "s.a.",
    "sa",
    "srl",
    "s.r.l.",
    "ltda",
    "limitada",
    "empresa",
    "corporación",
    "corp",
];

/// File extensions certificates are archived under.
const CERTIFICATE_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

/// Filename fragments that mark a file as a certificate.
const CERTIFICATE_KEYWORDS: &[&str] = &[
    "certificado",
    "certifica",
    "constancia",
    "personería",
    "firma",
    "vigencia",
    "poderes",
    "bps",
    "msp",
    "abitab",
];

static YMD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})[-_](\d{2})[-_](\d{2})").unwrap());

static DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})[-_](\d{2})[-_](\d{4})").unwrap());

static COMPACT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{8})").unwrap());

impl CustomerKind {
    /// Guess whether a folder name belongs to a person or a company.
    ///
    /// A company keyword anywhere in the lowercased name decides it;
    /// failing that, names longer than three words are assumed to be
    /// companies.
    pub fn infer(name: &str) -> Self {
        let name_lower = name.to_lowercase();
        if COMPANY_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
            return CustomerKind::Company;
        }
        if name.split_whitespace().count() > 3 {
            return CustomerKind::Company;
        }
        CustomerKind::Person
    }
}

/// Read the notary's rejection marker off a filename.
///
/// Returns the prefix flag and the state it implies.
pub fn certificate_state_from_filename(filename: &str) -> (bool, CertificateState) {
    let has_error = filename.to_uppercase().starts_with("ERROR");
    let state = if has_error {
        CertificateState::Error
    } else {
        CertificateState::Ok
    };
    (has_error, state)
}

/// Extract a date embedded in a filename.
///
/// Tries `YYYY-MM-DD`, `DD-MM-YYYY` (with `-` or `_` separators), then
/// bare `YYYYMMDD`, anywhere in the name. A match that is not a real
/// calendar date falls through to the next pattern.
pub fn date_from_filename(filename: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = YMD_RE.captures(filename) {
        if let Some(date) = to_midnight_utc(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }
    if let Some(caps) = DMY_RE.captures(filename) {
        if let Some(date) = to_midnight_utc(&caps[3], &caps[2], &caps[1]) {
            return Some(date);
        }
    }
    if let Some(caps) = COMPACT_RE.captures(filename) {
        let raw = &caps[1];
        if let Some(date) = to_midnight_utc(&raw[..4], &raw[4..6], &raw[6..8]) {
            return Some(date);
        }
    }
    None
}

fn to_midnight_utc(year: &str, month: &str, day: &str) -> Option<DateTime<Utc>> {
    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    let day = day.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_time(NaiveTime::MIN).and_utc())
}

/// Whether a filename looks like an archived certificate: a known
/// extension plus a certificate keyword somewhere in the name.
pub fn is_certificate_filename(filename: &str) -> bool {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    if !extension.is_some_and(|ext| CERTIFICATE_EXTENSIONS.contains(&ext.as_str())) {
        return false;
    }

    let filename_lower = filename.to_lowercase();
    CERTIFICATE_KEYWORDS.iter().any(|kw| filename_lower.contains(kw))
}
