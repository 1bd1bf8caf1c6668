//! Infer command — derive the bump type from the unreleased section.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use bumplog_core::config::Config;
use bumplog_core::version::{next_version, parse_version};

/// Arguments for the `infer` subcommand.
#[derive(Args, Debug, Default)]
pub struct InferArgs {
    /// Changelog file to analyze (overrides configuration)
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<String>,

    /// Changelog format (overrides configuration)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Also compute the next version from this current version
    #[arg(long, value_name = "VERSION")]
    pub next: Option<String>,
}

#[derive(Serialize)]
struct InferOutcome {
    format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bump: Option<String>,
    confidence: String,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_version: Option<String>,
}

/// Infer and print the bump type, with optional next-version computation.
#[instrument(name = "cmd_infer", skip_all)]
pub fn cmd_infer(args: InferArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let analyzer = super::analyzer_for_invocation(
        config,
        args.path.as_deref(),
        args.format.as_deref(),
    );

    let section = analyzer
        .parse()
        .context("failed to analyze changelog")?;
    let bump = section.inferred_bump;
    let confidence = section.confidence;

    debug!(bump = ?bump, %confidence, "inference complete");

    let next = match (&args.next, bump) {
        (Some(current), Some(level)) => {
            let current = parse_version(current)
                .with_context(|| format!("invalid current version: {current}"))?;
            Some(next_version(&current, level).to_string())
        }
        _ => None,
    };

    let outcome = InferOutcome {
        format: analyzer.format().to_string(),
        bump: bump.map(|b| b.to_string()),
        confidence: confidence.to_string(),
        entries: section.entries.len(),
        next_version: next,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome.bump {
            Some(bump) => println!("{}: {}", "Bump".dimmed(), bump.green().bold()),
            None => println!("{}: {}", "Bump".dimmed(), "none".yellow()),
        }
        println!("{}: {}", "Confidence".dimmed(), outcome.confidence);
        println!("{}: {}", "Entries".dimmed(), outcome.entries);
        if let Some(ref next) = outcome.next_version {
            println!("{}: {}", "Next version".dimmed(), next.cyan().bold());
        }
    }

    if args.next.is_some() && outcome.next_version.is_none() {
        anyhow::bail!("no bump type could be inferred from changelog");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn changelog(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = path.to_str().unwrap().to_string();
        (dir, path)
    }

    #[test]
    fn infer_with_next_succeeds_on_conclusive_changelog() {
        let (_dir, path) = changelog("## [Unreleased]\n\n### Added\n\n- thing\n");
        let args = InferArgs {
            path: Some(path),
            next: Some("1.2.3".to_string()),
            ..InferArgs::default()
        };
        assert!(cmd_infer(args, true, &Config::default()).is_ok());
    }

    #[test]
    fn infer_with_next_fails_when_inconclusive() {
        let (_dir, path) = changelog("## [Unreleased]\n");
        let args = InferArgs {
            path: Some(path),
            next: Some("1.2.3".to_string()),
            ..InferArgs::default()
        };
        assert!(cmd_infer(args, true, &Config::default()).is_err());
    }

    #[test]
    fn infer_without_next_tolerates_inconclusive() {
        let (_dir, path) = changelog("## [Unreleased]\n");
        let args = InferArgs {
            path: Some(path),
            ..InferArgs::default()
        };
        assert!(cmd_infer(args, true, &Config::default()).is_ok());
    }

    #[test]
    fn infer_rejects_bad_current_version() {
        let (_dir, path) = changelog("## [Unreleased]\n\n### Added\n\n- thing\n");
        let args = InferArgs {
            path: Some(path),
            next: Some("not-a-version".to_string()),
            ..InferArgs::default()
        };
        assert!(cmd_infer(args, true, &Config::default()).is_err());
    }
}
