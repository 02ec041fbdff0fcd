//! # `escriba evaluate`
//!
//! Loads the rule table, reads a case file, runs the engine, and prints the
//! evaluation result as pretty JSON on stdout. The process exit code
//! carries the verdict so shell pipelines can branch on it without parsing
//! the output.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use escriba_normalize::{normalize_record, ExtractedRecord};
use escriba_rules::{evaluate_case, CaseInput, CertificateStatus, RuleTable};

use crate::bridge;

/// Arguments for `escriba evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Case file to evaluate (JSON).
    #[arg(value_name = "CASE")]
    pub case: PathBuf,

    /// Rule table (JSON or YAML).
    #[arg(short, long, default_value = crate::DEFAULT_RULE_TABLE)]
    pub rules: PathBuf,

    /// Treat the case file as raw extraction output: normalize it and
    /// derive the case through the acta bridge before evaluating.
    #[arg(long)]
    pub from_extraction: bool,
}

/// Execute the evaluate subcommand.
///
/// Returns exit code: 0 for a VALID certificate, 1 for INVALID. Unreadable
/// input and unknown certificate types surface as errors.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let table = RuleTable::load(&args.rules)
        .with_context(|| format!("failed to load rule table {}", args.rules.display()))?;

    let content = fs::read_to_string(&args.case)
        .with_context(|| format!("failed to read case file {}", args.case.display()))?;

    let case: CaseInput = if args.from_extraction {
        let record: ExtractedRecord = serde_json::from_str(&content).with_context(|| {
            format!("failed to parse extraction output {}", args.case.display())
        })?;
        let report = normalize_record(&record);
        bridge::case_input_from_extraction(&record, &report)
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse case file {}", args.case.display()))?
    };

    tracing::info!(
        certificate_type = %case.certificate_type,
        facts = case.facts.len(),
        "evaluating case"
    );

    let result = evaluate_case(&table, &case)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    match result.status {
        CertificateStatus::Valid => Ok(0),
        CertificateStatus::Invalid => Ok(1),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const TABLE: &str = r#"{
        "certificado_firmas": {
            "base_legal": {"articulo_principal": 247, "literal": "B"},
            "requisitos": [
                {
                    "id": "firma_en_presencia",
                    "descripcion": "Firma estampada en presencia del escribano",
                    "obligatorio": true,
                    "fuente_legal": {"articulo": 247}
                }
            ]
        },
        "certificado_hechos": {
            "base_legal": {"articulo_principal": 251},
            "requisitos": [
                {
                    "id": "documento_fuente",
                    "descripcion": "Documento fuente",
                    "obligatorio": true,
                    "fuente_legal": {"articulo": 251}
                }
            ]
        }
    }"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn args(case: PathBuf, rules: PathBuf, from_extraction: bool) -> EvaluateArgs {
        EvaluateArgs {
            case,
            rules,
            from_extraction,
        }
    }

    #[test]
    fn valid_case_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", TABLE);
        let case = write(
            dir.path(),
            "case.json",
            r#"{"certificate_type": "certificado_firmas", "facts": {"firma_en_presencia": true}}"#,
        );

        let code = run_evaluate(&args(case, rules, false)).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn invalid_case_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", TABLE);
        let case = write(
            dir.path(),
            "case.json",
            r#"{"certificate_type": "certificado_firmas", "facts": {}}"#,
        );

        let code = run_evaluate(&args(case, rules, false)).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn extraction_input_goes_through_the_bridge() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", TABLE);
        let case = write(
            dir.path(),
            "acta.json",
            r#"{"document_type": "Acta de Asamblea", "denominacion": "Ferrominas S.A."}"#,
        );

        // The bridge always attests documento_fuente, the only requirement
        // of certificado_hechos in this table.
        let code = run_evaluate(&args(case, rules, true)).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_case_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", TABLE);

        let err = run_evaluate(&args(dir.path().join("absent.json"), rules, false)).unwrap_err();
        assert!(err.to_string().contains("failed to read case file"));
    }

    #[test]
    fn unknown_certificate_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", TABLE);
        let case = write(
            dir.path(),
            "case.json",
            r#"{"certificate_type": "certificado_inexistente"}"#,
        );

        assert!(run_evaluate(&args(case, rules, false)).is_err());
    }

    #[test]
    fn malformed_rule_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let rules = write(dir.path(), "rules.json", "{ not json");
        let case = write(dir.path(), "case.json", r#"{"certificate_type": "x"}"#);

        let err = run_evaluate(&args(case, rules, false)).unwrap_err();
        assert!(err.to_string().contains("failed to load rule table"));
    }
}
