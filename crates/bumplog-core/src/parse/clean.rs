//! Entry text cleaning.
//!
//! Changelog generators decorate entries with markdown links to commits and
//! pull requests, authorship annotations, and bolded scope prefixes. This
//! module strips the decoration down to plain prose, and pulls the scope
//! label out where one exists.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `**scope:** text` at the start of a bullet, tolerating `- `/`* ` prefixes.
static SCOPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*?\s*-?\s*\*\*([^:]+):\*\*\s*(.+)$").expect("valid regex"));

/// `**scope:** text` behind a GitHub-style `* ` bullet only.
static GITHUB_SCOPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s*\*\*([^:]+):\*\*\s*(.+)$").expect("valid regex"));

/// Trailing `([abc1234](url))` commit-hash link.
static COMMIT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\[([a-f0-9]+)\]\([^)]+\)\)").expect("valid regex"));

/// Trailing `([#123](url))` pull-request link.
static PR_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\[#(\d+)\]\([^)]+\)\)").expect("valid regex"));

/// Any remaining `[label](url)` markdown link.
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

/// GitHub release-notes `by @user` attribution.
static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+by\s+@[\w-]+").expect("valid regex"));

/// GitHub release-notes `in #123` issue/PR reference.
static PR_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+in\s+#\d+").expect("valid regex"));

/// Split a bolded-scope prefix off a grouped-format bullet line.
///
/// Returns `(scope, remainder)` when the line matches `**scope:** text`,
/// with the scope trimmed. The match runs against the whole bullet line,
/// not the stripped content, so the bullet marker is tolerated.
pub fn split_scope(line: &str) -> Option<(String, String)> {
    SCOPE_RE.captures(line).map(|caps| {
        (
            caps[1].trim().to_string(),
            caps[2].to_string(),
        )
    })
}

/// Split a bolded-scope prefix off a GitHub-format bullet line.
pub fn split_scope_github(line: &str) -> Option<(String, String)> {
    GITHUB_SCOPE_RE.captures(line).map(|caps| {
        (
            caps[1].trim().to_string(),
            caps[2].to_string(),
        )
    })
}

/// Remove a trailing commit-hash markdown link.
pub fn strip_commit_link(s: &str) -> Cow<'_, str> {
    COMMIT_LINK_RE.replace_all(s, "")
}

/// Remove a trailing PR-number markdown link.
pub fn strip_pr_link(s: &str) -> Cow<'_, str> {
    PR_LINK_RE.replace_all(s, "")
}

/// Replace any remaining `[label](url)` with the bare label.
pub fn flatten_markdown_links(s: &str) -> Cow<'_, str> {
    MARKDOWN_LINK_RE.replace_all(s, "$1")
}

/// Remove a `by @user` attribution.
pub fn strip_author(s: &str) -> Cow<'_, str> {
    AUTHOR_RE.replace_all(s, "")
}

/// Remove an `in #NNN` issue/PR reference.
pub fn strip_pr_ref(s: &str) -> Cow<'_, str> {
    PR_REF_RE.replace_all(s, "")
}
