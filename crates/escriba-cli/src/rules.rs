//! # `escriba rules`
//!
//! Prints what the rule table demands. Without a type the output is a
//! per-type summary; with `--type` it is the full requirement list of that
//! certificate type, citations included.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use escriba_rules::citation::format_basis;
use escriba_rules::{Requirement, RuleTable, RulesError};

/// Arguments for `escriba rules`.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rule table (JSON or YAML).
    #[arg(short, long, default_value = crate::DEFAULT_RULE_TABLE)]
    pub rules: PathBuf,

    /// Show the full requirement list for one certificate type.
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub certificate_type: Option<String>,
}

/// Execute the rules subcommand.
///
/// Returns exit code 0. An unreadable table or an unknown certificate type
/// surfaces as an error.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let table = RuleTable::load(&args.rules)
        .with_context(|| format!("failed to load rule table {}", args.rules.display()))?;

    match &args.certificate_type {
        Some(certificate_type) => print_certificate_type(&table, certificate_type)?,
        None => print_summary(&table),
    }

    Ok(0)
}

fn print_summary(table: &RuleTable) {
    let types = table.certificate_types();
    println!("Certificate types: {}", types.len());
    for name in types {
        let Some(rules) = table.get(name) else { continue };
        let conditional: usize = rules
            .requisitos_condicionales
            .iter()
            .map(|block| block.requisitos.len())
            .sum();
        println!(
            "  {name}: {} requirement(s), {} conditional",
            rules.requisitos.len(),
            conditional
        );
    }
    if let Some(global) = table.global_fields() {
        println!("Global fields: {}", global.campos.len());
    }
}

fn print_certificate_type(table: &RuleTable, certificate_type: &str) -> Result<()> {
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

    println!("{certificate_type}");
    if let Some(base) = &rules.base_legal {
        if let Some(basis) = format_basis(base.articulo_principal, base.literal.as_deref()) {
            println!("  base legal: {basis}");
        }
    }

    for requirement in &rules.requisitos {
        print_requirement(requirement, "  ");
    }

    for block in &rules.requisitos_condicionales {
        println!("  [si {}]", block.condicion);
        for requirement in &block.requisitos {
            print_requirement(requirement, "    ");
        }
    }

    Ok(())
}

/// One line per requirement: `*` marks mandatory, `-` optional.
fn print_requirement(requirement: &Requirement, indent: &str) {
    let marker = if requirement.obligatorio { "*" } else { "-" };
    let expiry = if requirement.puede_vencer {
        " (puede vencer)"
    } else {
        ""
    };
    let (article, literal, _) = requirement.legal_source();
    match format_basis(article, literal) {
        Some(basis) => println!(
            "{indent}{marker} {} — {basis}{expiry}",
            requirement.description()
        ),
        None => println!("{indent}{marker} {}{expiry}", requirement.description()),
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
                    "obligatorio": true,
                    "puede_vencer": false,
                    "fuente_legal": {"articulo": 247}
                }
            ],
            "requisitos_condicionales": [
                {
                    "condicion": "otorgante_no_sabe_o_no_puede_firmar",
                    "requisitos": [
                        {"id": "firma_a_ruego", "obligatorio": true}
                    ]
                }
            ]
        },
        "requisitos_globales_certificado": {
            "base_legal": {"articulo": 255},
            "campos": [{"id": "nombre_solicitante"}]
        }
    }"#;

    fn write_table(dir: &Path) -> PathBuf {
        let path = dir.join("rules.json");
        fs::write(&path, TABLE).unwrap();
        path
    }

    #[test]
    fn summary_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_rules(&RulesArgs {
            rules: write_table(dir.path()),
            certificate_type: None,
        })
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn known_type_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_rules(&RulesArgs {
            rules: write_table(dir.path()),
            certificate_type: Some("certificado_firmas".to_string()),
        })
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_rules(&RulesArgs {
            rules: write_table(dir.path()),
            certificate_type: Some("certificado_inexistente".to_string()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("certificado_inexistente"));
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_rules(&RulesArgs {
            rules: dir.path().join("absent.json"),
            certificate_type: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("failed to load rule table"));
    }
}
