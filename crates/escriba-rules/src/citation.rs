//! # Citation Formatting
//!
//! Statutory bases and the operator-facing finding messages built from
//! them. The messages are Spanish and their wording is part of the contract
//! with the practice — stored reports are compared against them verbatim,
//! so the strings here must not drift.

/// Format a statutory basis: `Art. 247` or `Art. 247 lit. B`.
///
/// Returns `None` when no article is configured; a literal on its own
/// cites nothing, and an empty literal is treated as absent.
pub fn format_basis(article: Option<i64>, literal: Option<&str>) -> Option<String> {
    let article = article?;
    match literal.filter(|lit| !lit.is_empty()) {
        Some(lit) => Some(format!("Art. {article} lit. {lit}")),
        None => Some(format!("Art. {article}")),
    }
}

/// Message for a missing mandatory requirement.
///
/// The cross-reference clause is only added when a primary basis exists —
/// a requirement cannot be read "en relación con" another article if it
/// cites no article of its own.
pub fn missing_message(
    description: &str,
    article: Option<i64>,
    literal: Option<&str>,
    cross_reference: Option<i64>,
) -> String {
    match format_basis(article, literal) {
        None => format!("Falta '{description}'."),
        Some(basis) => match cross_reference {
            Some(cross) => format!(
                "Falta '{description}', exigido por {basis} en relación con Art. {cross}."
            ),
            None => format!("Falta '{description}', exigido por {basis}."),
        },
    }
}

/// Message for an expired requirement.
pub fn expired_message(
    description: &str,
    article: Option<i64>,
    literal: Option<&str>,
    cross_reference: Option<i64>,
) -> String {
    match format_basis(article, literal) {
        None => format!("'{description}' se encuentra vencido."),
        Some(basis) => match cross_reference {
            Some(cross) => format!(
                "'{description}' se encuentra vencido, incumpliendo {basis} en relación con Art. {cross}."
            ),
            None => format!("'{description}' se encuentra vencido, incumpliendo {basis}."),
        },
    }
}
