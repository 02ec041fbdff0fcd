//! # Decision Engine
//!
//! Evaluates a case against a [`RuleTable`] and produces an
//! [`EvaluationResult`]. The evaluation order is fixed and observable in
//! the output:
//!
//! 1. the certificate type's own requirements, in table order;
//! 2. conditional blocks whose condition the case activates, in table order;
//! 3. the global fields every certificate must carry.
//!
//! Every evaluated requirement contributes its citation to the legal basis,
//! satisfied or not — the basis records which statutes were *consulted*,
//! not which were violated. Findings record the violations.
//!
//! ## Severity
//!
//! A certificate is VALID exactly when no findings were produced. All
//! current findings are errors; the `warnings` lane exists so advisory
//! rules can be added without changing the report shape consumers parse.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use escriba_core::fact::{self, FactValue};

use crate::citation;
use crate::error::{RulesError, RulesResult};
use crate::table::{GlobalFieldSet, Requirement, RuleTable};

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// The way a requirement failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// A mandatory requirement has no present fact.
    Missing,
    /// An expirable requirement's document is expired.
    Expired,
}

/// One violated requirement, with its statutory citation and the
/// operator-facing message.
///
/// Serialized field names match the reports the practice already stores;
/// `article`/`literal` are emitted even when null so existing consumers
/// keep seeing the full shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// How the requirement failed.
    pub kind: FindingKind,

    /// The requirement (or global field) id.
    #[serde(rename = "id")]
    pub rule_id: String,

    /// The requirement description, as written by counsel.
    #[serde(rename = "description_es")]
    pub description: String,

    /// Article cited by the requirement.
    pub article: Option<i64>,

    /// Literal within the article.
    pub literal: Option<String>,

    /// Article the requirement is read in relation with.
    #[serde(rename = "cross_reference_article")]
    pub cross_reference: Option<i64>,

    /// Operator-facing message in Spanish.
    #[serde(rename = "message_es")]
    pub message: String,
}

/// Certificate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CertificateStatus {
    /// Every requirement checked out.
    Valid,
    /// At least one finding was produced.
    Invalid,
}

/// The complete output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The verdict.
    pub status: CertificateStatus,

    /// Findings that invalidate the certificate.
    pub errors: Vec<Finding>,

    /// Advisory findings. No current rule produces one; the lane is part of
    /// the report shape.
    pub warnings: Vec<Finding>,

    /// Deduplicated citations consulted during evaluation, in first-seen
    /// order.
    pub legal_basis: Vec<String>,
}

// ---------------------------------------------------------------------------
// Case input
// ---------------------------------------------------------------------------

/// A case to evaluate: the certificate type plus everything asserted about
/// the certificate.
///
/// Maps are ordered so that evaluation, serialization, and logs are
/// deterministic run to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    /// Which certificate type's rules apply.
    pub certificate_type: String,

    /// Facts keyed by requirement id.
    #[serde(default)]
    pub facts: BTreeMap<String, FactValue>,

    /// Condition switches keyed by condition id. A condition not listed is
    /// inactive.
    #[serde(default)]
    pub conditions: BTreeMap<String, bool>,

    /// Facts for the globally mandated fields, keyed by field id.
    #[serde(default)]
    pub global_fields: BTreeMap<String, FactValue>,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate a case against the rule table.
///
/// Pure: the verdict depends only on the arguments. Findings appear in
/// evaluation order; the legal basis is deduplicated preserving first-seen
/// order.
///
/// # Errors
///
/// [`RulesError::UnknownCertificateType`] when the table does not define
/// `certificate_type`; the error lists the types it does define.
pub fn evaluate(
    table: &RuleTable,
    certificate_type: &str,
    facts: &BTreeMap<String, FactValue>,
    conditions: &BTreeMap<String, bool>,
    global_fields: &BTreeMap<String, FactValue>,
) -> RulesResult<EvaluationResult> {
    let rules = table
        .get(certificate_type)
        .ok_or_else(|| RulesError::UnknownCertificateType {
            requested: certificate_type.to_string(),
            available: table
                .certificate_types()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        })?;

    let mut findings = Vec::new();
    let mut legal_basis = Vec::new();

    if let Some(base) = &rules.base_legal {
        if let Some(basis) = citation::format_basis(base.articulo_principal, base.literal.as_deref())
        {
            legal_basis.push(basis);
        }
    }

    for requirement in &rules.requisitos {
        check_requirement(requirement, facts, &mut findings, &mut legal_basis);
    }

    for block in &rules.requisitos_condicionales {
        if !conditions.get(&block.condicion).copied().unwrap_or(false) {
            continue;
        }
        for requirement in &block.requisitos {
            check_requirement(requirement, facts, &mut findings, &mut legal_basis);
        }
    }

    if let Some(global) = table.global_fields() {
        check_global_fields(global, global_fields, &mut findings, &mut legal_basis);
    }

    let legal_basis = dedup_preserving_order(legal_basis);
    let status = if findings.is_empty() {
        CertificateStatus::Valid
    } else {
        CertificateStatus::Invalid
    };

    tracing::debug!(
        certificate_type,
        errors = findings.len(),
        status = ?status,
        "evaluated certificate"
    );

    Ok(EvaluationResult {
        status,
        errors: findings,
        warnings: Vec::new(),
        legal_basis,
    })
}

/// Evaluate a [`CaseInput`] against the rule table.
pub fn evaluate_case(table: &RuleTable, case: &CaseInput) -> RulesResult<EvaluationResult> {
    evaluate(
        table,
        &case.certificate_type,
        &case.facts,
        &case.conditions,
        &case.global_fields,
    )
}

/// Check one requirement against the case facts.
///
/// The citation is recorded before the presence check — the basis lists
/// what was consulted, including requirements that pass.
fn check_requirement(
    requirement: &Requirement,
    facts: &BTreeMap<String, FactValue>,
    findings: &mut Vec<Finding>,
    legal_basis: &mut Vec<String>,
) {
    let (article, literal, cross_reference) = requirement.legal_source();

    if let Some(basis) = citation::format_basis(article, literal) {
        legal_basis.push(basis);
    }

    let value = facts.get(&requirement.id);

    if requirement.obligatorio && !fact::presence(value) {
        findings.push(Finding {
            kind: FindingKind::Missing,
            rule_id: requirement.id.clone(),
            description: requirement.description().to_string(),
            article,
            literal: literal.map(str::to_string),
            cross_reference,
            message: citation::missing_message(
                requirement.description(),
                article,
                literal,
                cross_reference,
            ),
        });
        return;
    }

    if requirement.puede_vencer {
        if let Some(value) = value {
            // An explicit null carries no expiration evidence either way.
            if !value.is_null() && value.expiration() == Some(true) {
                findings.push(Finding {
                    kind: FindingKind::Expired,
                    rule_id: requirement.id.clone(),
                    description: requirement.description().to_string(),
                    article,
                    literal: literal.map(str::to_string),
                    cross_reference,
                    message: citation::expired_message(
                        requirement.description(),
                        article,
                        literal,
                        cross_reference,
                    ),
                });
            }
        }
    }
}

/// Check the globally mandated fields. Each one is mandatory; the citation
/// comes from the global field set's own basis, not from a per-requirement
/// source.
fn check_global_fields(
    global: &GlobalFieldSet,
    global_fields: &BTreeMap<String, FactValue>,
    findings: &mut Vec<Finding>,
    legal_basis: &mut Vec<String>,
) {
    let article = global.article();

    if let Some(basis) = citation::format_basis(article, None) {
        legal_basis.push(basis);
    }

    for field in &global.campos {
        if !fact::presence(global_fields.get(&field.id)) {
            findings.push(Finding {
                kind: FindingKind::Missing,
                rule_id: field.id.clone(),
                description: field.description().to_string(),
                article,
                literal: None,
                cross_reference: None,
                message: citation::missing_message(field.description(), article, None, None),
            });
        }
    }
}

/// Deduplicate citations, keeping the first occurrence of each.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
