//! # escriba — binary entry point
//!
//! Parses the command line, configures logging from the `-v` count, and
//! dispatches to the subcommand handlers in the library crate. All exit
//! codes funnel through here: handlers report their code as `Ok(u8)`, and
//! any error they surface becomes exit code 2.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use escriba_cli::evaluate::{run_evaluate, EvaluateArgs};
use escriba_cli::normalize::{run_normalize, NormalizeArgs};
use escriba_cli::rules::{run_rules, RulesArgs};

/// Compliance tooling for Uruguayan notarial certificates.
#[derive(Parser, Debug)]
#[command(name = "escriba", version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a case file against the rule table.
    Evaluate(EvaluateArgs),

    /// Normalize raw extraction output into a normalization report.
    Normalize(NormalizeArgs),

    /// Inspect the rule table.
    Rules(RulesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Normalize(args) => run_normalize(&args),
        Commands::Rules(args) => run_rules(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
