//! Changelog format detection.
//!
//! Scans every line once for four independent lexical signals, then
//! resolves them in fixed priority order — the order the signals appear in
//! the document never matters. The bracketed version header is the least
//! ambiguous signal so it always wins; the minimal entry line is the next
//! most distinctive.

use tracing::debug;

use crate::parse::{Format, minimal};

/// Classify buffered changelog content into one of the four formats.
///
/// Defaults to [`Format::KeepAChangelog`] when nothing matches.
pub fn detect_format(content: &str) -> Format {
    let mut has_keepachangelog_header = false;
    let mut has_minimal_entry = false;
    let mut has_whats_changed = false;
    let mut has_version_with_v = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("## [") {
            has_keepachangelog_header = true;
        }

        if minimal::is_entry_line(trimmed) {
            has_minimal_entry = true;
        }

        if trimmed.starts_with("### What's Changed") {
            has_whats_changed = true;
        }

        if trimmed.starts_with("## v") || trimmed.starts_with("## V") {
            has_version_with_v = true;
        }
    }

    let format = if has_keepachangelog_header {
        Format::KeepAChangelog
    } else if has_minimal_entry {
        Format::Minimal
    } else if has_whats_changed {
        Format::GitHub
    } else if has_version_with_v {
        Format::Grouped
    } else {
        Format::KeepAChangelog
    };

    debug!(%format, "detected changelog format");
    format
}
