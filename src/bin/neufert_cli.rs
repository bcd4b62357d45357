//! Neufert CLI - Bridge interface for callers outside Rust
//!
//! Commands: standards, validate, sample
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 when the design has errors

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use neufert_core::{default_standards_path, DesignParameters, StandardsChecker, ValidationResult};

#[derive(Parser)]
#[command(name = "neufert-cli", version)]
#[command(about = "Neufert CLI - validate design parameters against reference standards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the standards JSON file (defaults to $NEUFERT_STANDARDS or neufert_standards.json)
    #[arg(short, long, global = true)]
    standards: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded standards categories
    Standards,

    /// Validate design parameters
    Validate {
        /// JSON payload (DesignParameters)
        #[arg(short, long)]
        payload: String,
    },

    /// Validate the built-in example design (0.8m door, 9m² room)
    Sample,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit(value: &impl Serialize) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "error": format!("Failed to serialize output: {}", e) }));
            false
        }
    }
}

fn sample_parameters() -> DesignParameters {
    [("door_width", 0.8), ("room_size", 9.0)].into_iter().collect()
}

/// Exit status for a completed validation: 2 when the design has errors.
fn validation_status(result: &ValidationResult) -> u8 {
    if result.has_errors() {
        2
    } else {
        0
    }
}

fn parse_payload(payload: &str) -> Result<DesignParameters, serde_json::Value> {
    serde_json::from_str(payload)
        .map_err(|e| serde_json::json!({ "error": format!("Invalid payload: {}", e) }))
}

fn run_validation(checker: &StandardsChecker, params: &DesignParameters) -> ExitCode {
    let result = checker.check(params);
    if !emit(&result) {
        return ExitCode::FAILURE;
    }
    ExitCode::from(validation_status(&result))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.standards.unwrap_or_else(default_standards_path);
    let checker = StandardsChecker::from_path(&path);

    match cli.command {
        Commands::Standards => {
            let categories: Vec<_> = checker
                .standards()
                .categories()
                .map(|(name, spec)| serde_json::json!({
                    "category": name,
                    "min_width": spec.min_width,
                    "max_width": spec.max_width,
                    "min_area": spec.min_area,
                    "max_area": spec.max_area,
                    "recommendation": spec.recommendation,
                }))
                .collect();

            if emit(&categories) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }

        Commands::Validate { payload } => {
            let params = match parse_payload(&payload) {
                Ok(p) => p,
                Err(error) => {
                    println!("{}", error);
                    return ExitCode::FAILURE;
                }
            };
            run_validation(&checker, &params)
        }

        Commands::Sample => run_validation(&checker, &sample_parameters()),
    }
}
