//! # `escriba normalize`
//!
//! Parses raw extraction output, runs the normalization pipeline, and
//! prints the report as pretty JSON. An optional output path additionally
//! writes the report to disk.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use escriba_normalize::{normalize_record, ExtractedRecord};

/// Arguments for `escriba normalize`.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Extraction output file (JSON).
    #[arg(value_name = "EXTRACTED")]
    pub input: PathBuf,

    /// Also write the report to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the normalize subcommand.
///
/// Returns exit code 0. Normalization itself never fails; unreadable or
/// malformed input surfaces as an error.
pub fn run_normalize(args: &NormalizeArgs) -> Result<u8> {
    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read extraction output {}", args.input.display()))?;
    let record: ExtractedRecord = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse extraction output {}", args.input.display()))?;

    let report = normalize_record(&record);
    let rendered = serde_json::to_string_pretty(&report)?;

    if let Some(output) = &args.output {
        fs::write(output, &rendered)
            .with_context(|| format!("failed to write report to {}", output.display()))?;
        tracing::info!(path = %output.display(), "wrote normalization report");
    }

    println!("{rendered}");
    Ok(0)
}
