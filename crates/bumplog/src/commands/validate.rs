//! Validate command — check the unreleased section holds entries.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use bumplog_core::analyzer::AnalyzerError;
use bumplog_core::config::Config;

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Changelog file to validate (overrides configuration)
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<String>,

    /// Changelog format (overrides configuration)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,
}

#[derive(Serialize)]
struct ValidateOutcome {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Validate the changelog and print the result.
///
/// Exits nonzero when the unreleased section is missing or empty.
#[instrument(name = "cmd_validate", skip_all)]
pub fn cmd_validate(args: ValidateArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let analyzer = super::analyzer_for_invocation(
        config,
        args.path.as_deref(),
        args.format.as_deref(),
    );

    // Direct invocation asks for the check, so enforce it even when the
    // config file has require_unreleased_section switched off.
    let result = match analyzer.parse() {
        Ok(section) if section.has_entries() => Ok(()),
        Ok(_) => Err(AnalyzerError::NoEntries),
        Err(e) => Err(e),
    };

    debug!(valid = result.is_ok(), "validation complete");

    let outcome = ValidateOutcome {
        valid: result.is_ok(),
        reason: result.as_ref().err().map(ToString::to_string),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.valid {
        println!("{} unreleased section has entries", "✓".green());
    } else if let Some(ref reason) = outcome.reason {
        println!("{} {}", "✗".red(), reason);
    }

    result.map_err(Into::into)
}
