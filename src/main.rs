//! Command-line front end for the language gate.
//!
//! Usage:
//!   language-gate detect [TEXT...]                # Print the detected target as JSON
//!   language-gate instruct [TEXT...]              # Print the initial generation directive
//!   language-gate validate FIELDS.json [TEXT...]  # Validate generated fields against TEXT
//!
//! TEXT is read from stdin when omitted. `validate` exits with status 2 when
//! any field is in the wrong language.

use anyhow::{bail, Context, Result};
use language_gate::config::Config;
use language_gate::fields::load_fields;
use language_gate::language::{
    build_corrective_instruction, build_initial_instruction, detect, validate_fields,
};
use serde_json::json;
use std::io::Read;
use std::process::ExitCode;
use tracing::info;

const USAGE: &str = "Usage: language-gate <detect|instruct|validate FIELDS.json> [TEXT...]";

fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_gate=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Language gate starting (max attempts: {}, enforcement: {})",
        config.max_generation_attempts, config.enforcement_enabled
    );

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(1));
    };

    match command.as_str() {
        "detect" => {
            let text = read_text(args.collect())?;
            println!("{}", serde_json::to_string_pretty(&detect(&text))?);
            Ok(ExitCode::SUCCESS)
        }
        "instruct" => {
            let text = read_text(args.collect())?;
            println!("{}", build_initial_instruction(&detect(&text)));
            Ok(ExitCode::SUCCESS)
        }
        "validate" => {
            let Some(path) = args.next() else {
                bail!("validate requires a FIELDS.json path\n{USAGE}");
            };
            let fields = load_fields(&path)
                .with_context(|| format!("Failed to load fields from {}", path))?;
            let text = read_text(args.collect())?;

            let target = detect(&text);
            let validation = validate_fields(&target, &fields);
            info!(
                "Validated {} fields against {} ({}): {} checked, {} skipped, {} mismatched",
                fields.len(),
                target.label(),
                target.code(),
                validation.checked_fields,
                validation.skipped_fields,
                validation.mismatches.len()
            );

            let corrective_instruction = if validation.is_match() {
                String::new()
            } else {
                build_corrective_instruction(&target, &validation)
            };
            let report = json!({
                "target": target,
                "validation": validation,
                "corrective_instruction": corrective_instruction,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);

            Ok(if validation.is_match() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        other => {
            eprintln!("Unknown command: {other}\n{USAGE}");
            Ok(ExitCode::from(1))
        }
    }
}

/// Join the remaining arguments, or read all of stdin when there are none.
fn read_text(args: Vec<String>) -> Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}
