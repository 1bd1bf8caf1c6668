//! Detect command — report which changelog format a file uses.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use bumplog_core::config::Config;
use bumplog_core::parse::detect_format;

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug, Default)]
pub struct DetectArgs {
    /// Changelog file to inspect (overrides configuration)
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<String>,
}

#[derive(Serialize)]
struct DetectOutcome {
    path: String,
    format: String,
}

/// Detect and print the changelog format.
#[instrument(name = "cmd_detect", skip_all)]
pub fn cmd_detect(args: DetectArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let path = args
        .path
        .as_deref()
        .unwrap_or(&config.changelog.path)
        .to_string();

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read changelog at {path}"))?;
    let format = detect_format(&content);

    debug!(%path, %format, "detected format");

    let outcome = DetectOutcome {
        path,
        format: format.to_string(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "{}: {}",
            outcome.path.dimmed(),
            outcome.format.cyan().bold()
        );
    }

    Ok(())
}
