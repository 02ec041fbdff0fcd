//! Date normalization.
//!
//! Certificates carry dates in three shapes: ISO (`2012-10-11`),
//! day-first numeric (`11/10/2012`), and written-out Spanish
//! (`11 de octubre 2012`). All three normalize to ISO `YYYY-MM-DD`; the
//! original string and a confidence level ride along so a reviewer can
//! always see what the document actually said.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

static DAY_MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

static SPANISH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2})\s+de\s+(\w+)\s+(\d{4})").unwrap());

/// How much to trust a normalized date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateConfidence {
    /// Matched a known format and is a real calendar date.
    High,
    /// The field had content but no format matched (or the date does not
    /// exist, like February 31st).
    Low,
    /// The field was absent.
    Missing,
}

/// A date field after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDate {
    /// ISO `YYYY-MM-DD`, when a format matched.
    pub normalized: Option<String>,
    /// The string as extracted from the document.
    pub original: Option<String>,
    /// How much to trust `normalized`.
    pub confidence: DateConfidence,
}

impl NormalizedDate {
    /// The value of an absent date field.
    pub fn missing() -> Self {
        Self {
            normalized: None,
            original: None,
            confidence: DateConfidence::Missing,
        }
    }
}

/// Normalize a date string to ISO `YYYY-MM-DD`.
///
/// Formats are tried in order: ISO, `DD/MM/YYYY`, then Spanish
/// `DD de MES YYYY` (month names case-insensitive, with the `set`, `oct`,
/// `nov`, `dic` abbreviations). Each candidate match must be a real
/// calendar date; an impossible one falls through to the next format.
/// The patterns search anywhere in the string, so a date embedded in
/// surrounding text is still found.
pub fn normalize_date(raw: Option<&str>) -> NormalizedDate {
    let Some(raw) = raw else {
        return NormalizedDate::missing();
    };
    if raw.is_empty() || raw == "null" {
        return NormalizedDate::missing();
    }

    let normalized = try_iso(raw)
        .or_else(|| try_day_month_year(raw))
        .or_else(|| try_spanish(raw));

    match normalized {
        Some(normalized) => NormalizedDate {
            normalized: Some(normalized),
            original: Some(raw.to_string()),
            confidence: DateConfidence::High,
        },
        None => NormalizedDate {
            normalized: None,
            original: Some(raw.to_string()),
            confidence: DateConfidence::Low,
        },
    }
}

fn try_iso(raw: &str) -> Option<String> {
    let caps = ISO_RE.captures(raw)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    canonical(year, month, day)
}

fn try_day_month_year(raw: &str) -> Option<String> {
    let caps = DAY_MONTH_YEAR_RE.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    canonical(year, month, day)
}

fn try_spanish(raw: &str) -> Option<String> {
    let caps = SPANISH_RE.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    canonical(year, month, day)
}

/// Validate and format. `from_ymd_opt` rejects impossible dates.
fn canonical(year: i32, month: u32, day: u32) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn month_number(name: &str) -> Option<u32> {
    let number = match name.to_lowercase().as_str() {
        "enero" => 1,
        "febrero" => 2,
        "marzo" => 3,
        "abril" => 4,
        "mayo" => 5,
        "junio" => 6,
        "julio" => 7,
        "agosto" => 8,
        "septiembre" | "set" => 9,
        "octubre" | "oct" => 10,
        "noviembre" | "nov" => 11,
        "diciembre" | "dic" => 12,
        _ => return None,
    };
    Some(number)
}
