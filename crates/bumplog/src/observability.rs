//! Logging setup for the CLI.
//!
//! Events go to a daily-rotated JSONL file, or to stderr when no writable
//! location exists. Never stdout: that stream is reserved for command
//! output, `--json` results included.
//!
//! The log location is resolved in order: `BUMPLOG_LOG_PATH` (exact file),
//! `BUMPLOG_LOG_DIR`, the configured `log_dir`, then the XDG data
//! directory.

use std::path::{Path, PathBuf};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const ENV_LOG_PATH: &str = "BUMPLOG_LOG_PATH";
const ENV_LOG_DIR: &str = "BUMPLOG_LOG_DIR";
const LOG_FILE_NAME: &str = "bumplog.jsonl";

/// Keeps the non-blocking writer's worker thread alive.
///
/// Hold this for the application lifetime; dropping it flushes and stops
/// the background writer.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Build an `EnvFilter` from CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > `RUST_LOG` > configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    if verbose > 0 {
        return EnvFilter::new(if verbose == 1 { "debug" } else { "trace" });
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber and return the writer guard.
pub fn init(config_log_dir: Option<PathBuf>, filter: EnvFilter) -> LogGuard {
    let path_override = std::env::var_os(ENV_LOG_PATH).map(PathBuf::from);
    let dir_override = std::env::var_os(ENV_LOG_DIR).map(PathBuf::from);

    let target = resolve_log_target(path_override, dir_override, config_log_dir)
        .and_then(|(dir, file)| ensure_writable(&dir, &file).then_some((dir, file)));

    let (writer, guard) = match target {
        Some((dir, file)) => {
            let appender = tracing_appender::rolling::daily(dir, file);
            tracing_appender::non_blocking(appender)
        }
        None => {
            eprintln!("Warning: no writable log location found. Logging to stderr.");
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    let log_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(log_layer)
        .init();

    tracing::debug!("logging initialized");

    LogGuard { _guard: guard }
}

/// Pick the log directory and file name from the available overrides.
///
/// Returns `None` only when every source is absent and no XDG data
/// directory can be determined.
fn resolve_log_target(
    path_override: Option<PathBuf>,
    dir_override: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Option<(PathBuf, String)> {
    if let Some(path) = path_override {
        let file = path.file_name()?.to_str()?.to_string();
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        return Some((dir, file));
    }

    let dir = dir_override.or(config_dir).or_else(|| {
        directories::ProjectDirs::from("", "", "bumplog")
            .map(|dirs| dirs.data_local_dir().join("logs"))
    })?;
    Some((dir, LOG_FILE_NAME.to_string()))
}

/// True when the directory exists (or can be created) and the log file
/// can be opened for append.
fn ensure_writable(dir: &Path, file_name: &str) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(file_name))
        .is_ok()
}
