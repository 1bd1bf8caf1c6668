//! Command implementations

pub mod detect;

pub mod infer;

pub mod info;

pub mod validate;

use bumplog_core::analyzer::ChangelogAnalyzer;
use bumplog_core::config::{ChangelogConfig, Config};

/// Build an analyzer for a direct CLI invocation.
///
/// Running a changelog subcommand is itself the opt-in, so `enabled` is
/// forced on regardless of the config file. `--path` and `--format` flags
/// override the configured values.
pub fn analyzer_for_invocation(
    config: &Config,
    path: Option<&str>,
    format: Option<&str>,
) -> ChangelogAnalyzer {
    let mut changelog = ChangelogConfig {
        enabled: true,
        ..config.changelog.clone()
    };
    if let Some(path) = path {
        changelog.path = path.to_string();
    }
    if let Some(format) = format {
        changelog.format = format.to_string();
    }
    ChangelogAnalyzer::new(changelog)
}
