//! Name normalization.
//!
//! Extracted names arrive in every casing the source documents use:
//! all-caps company headers, lowercase form fields, mixed hand-typed
//! entries. Normalization title-cases them while leaving abbreviations
//! ("S.A.", "SRL") and short acronyms ("DGI", "BPS") untouched.

/// Normalize a personal or company name to title case.
///
/// Words containing a dot and short all-caps words (four characters or
/// fewer) are kept verbatim — those are abbreviations and acronyms, not
/// casing accidents. Everything else is title-cased per alphabetic run,
/// so hyphenated names come out as `Ana-María`, not `Ana-maría`.
///
/// Returns `None` for absent, blank, or literal-`"null"` input, and for
/// input that contains no words at all.
pub fn normalize_name(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }

    let words: Vec<String> = raw
        .split_whitespace()
        .map(|word| {
            if word.contains('.') || (is_all_caps(word) && word.chars().count() <= 4) {
                word.to_string()
            } else {
                title_case(word)
            }
        })
        .collect();

    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

/// At least one uppercase letter and no lowercase ones.
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
/// Non-alphabetic characters pass through and start a new run.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut run_start = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if run_start {
                out.extend(ch.to_uppercase());
                run_start = false;
            } else {
                out.extend(ch.to_lowercase());
            }
        } else {
            out.push(ch);
            run_start = true;
        }
    }
    out
}
