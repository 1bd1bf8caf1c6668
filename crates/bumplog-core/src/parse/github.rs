//! GitHub release-notes parser.
//!
//! Parses the changelog GitHub's release automation produces: `* ` bullets
//! under "What's Changed" and "Breaking Changes" sections, with `by @user`
//! and `in #NNN` decorations. The format carries almost no type
//! information — "What's Changed" cannot distinguish a minor change from a
//! patch — so entries there stay unclassified and inference reports low
//! confidence. That is a documented limitation of the format, not a
//! parsing defect.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{Category, Confidence, ParsedEntry, ParsedSection};
use crate::parse::clean;
use crate::parse::{ParseError, ParseResult};
use crate::version::BumpLevel;

/// `## v1.2.3 [- date]` version header (same shape as the grouped format).
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+(v?\d+\.\d+\.\d+\S*)\s*(?:-\s*(.+))?$").expect("valid regex")
});

/// `### Name` section header.
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(.+)$").expect("valid regex"));

/// Parse the first (topmost) version section of GitHub release notes.
pub fn parse_unreleased(input: &mut dyn BufRead) -> ParseResult<ParsedSection> {
    let mut section = ParsedSection::default();
    let mut in_first_version = false;
    let mut current_section = String::new();
    let mut is_breaking_section = false;
    let mut is_whats_changed = false;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if let Some(caps) = VERSION_RE.captures(trimmed) {
            if in_first_version {
                break;
            }
            section.version = caps[1].to_string();
            section.date = caps
                .get(2)
                .map(|d| d.as_str().trim().to_string())
                .filter(|d| !d.is_empty());
            in_first_version = true;
            continue;
        }

        if !in_first_version {
            continue;
        }

        if let Some(caps) = SECTION_RE.captures(trimmed) {
            current_section = caps[1].trim().to_string();
            is_breaking_section = current_section.eq_ignore_ascii_case("Breaking Changes");
            is_whats_changed = current_section.eq_ignore_ascii_case("What's Changed");
            continue;
        }

        // GitHub notes use `* ` bullets only.
        if !current_section.is_empty() && trimmed.starts_with("* ") {
            section.entries.push(parse_entry(
                trimmed,
                &current_section,
                is_breaking_section,
                is_whats_changed,
            ));
        }
    }

    if !in_first_version {
        return Err(ParseError::VersionNotFound);
    }

    infer_bump_type(&mut section);
    debug!(
        version = %section.version,
        entries = section.entries.len(),
        confidence = %section.confidence,
        "parsed github section"
    );
    Ok(section)
}

fn parse_entry(
    line: &str,
    section_name: &str,
    is_breaking: bool,
    is_whats_changed: bool,
) -> ParsedEntry {
    let mut entry = ParsedEntry {
        original_section: section_name.to_string(),
        is_breaking,
        ..ParsedEntry::default()
    };

    if is_breaking {
        entry.category = Some(Category::Removed);
    } else if is_whats_changed {
        entry.category = None;
    }

    let mut content = line.strip_prefix("* ").unwrap_or(line).to_string();

    if let Some((scope, rest)) = clean::split_scope_github(line) {
        entry.scope = Some(scope);
        content = rest;
    }

    let content = clean::strip_author(&content);
    let content = clean::strip_pr_ref(&content);
    entry.description = content.trim().to_string();

    entry
}

/// Breaking is the only strong signal this format has.
fn infer_bump_type(section: &mut ParsedSection) {
    if section.entries.is_empty() {
        section.confidence = Confidence::None;
        return;
    }

    let has_breaking = section.entries.iter().any(|e| e.is_breaking);
    let has_unknown = section
        .entries
        .iter()
        .any(|e| !e.is_breaking && e.category.is_none());

    if has_breaking {
        section.inferred_bump = Some(BumpLevel::Major);
        section.confidence = Confidence::High;
        return;
    }

    if has_unknown {
        // "What's Changed" entries: something shipped, severity unknowable.
        section.confidence = Confidence::Low;
        return;
    }

    // Defined fallback, unreachable while only the two recognized section
    // names assign categories, but required if recognition is extended.
    section.confidence = Confidence::None;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParseResult<ParsedSection> {
        parse_unreleased(&mut content.as_bytes())
    }

    #[test]
    fn whats_changed_entries_are_unclassified_low_confidence() {
        let content = "\
## v1.2.0

### What's Changed

* Add dark mode by @octocat in #77
* Fix login redirect by @hubot in #78
";
        let section = parse(content).unwrap();
        assert_eq!(section.entries.len(), 2);
        assert_eq!(section.entries[0].category, None);
        assert_eq!(section.entries[0].description, "Add dark mode");
        assert_eq!(section.entries[1].description, "Fix login redirect");
        assert_eq!(section.inferred_bump, None);
        assert_eq!(section.confidence, Confidence::Low);
    }

    #[test]
    fn breaking_changes_force_major_high() {
        let content = "\
## v2.0.0

### Breaking Changes

* Drop support for TLS 1.0 by @octocat in #90

### What's Changed

* Routine fix by @hubot in #91
";
        let section = parse(content).unwrap();
        assert!(section.entries[0].is_breaking);
        assert_eq!(section.entries[0].category, Some(Category::Removed));
        assert_eq!(section.inferred_bump, Some(BumpLevel::Major));
        assert_eq!(section.confidence, Confidence::High);
    }

    #[test]
    fn dash_bullets_are_not_entries() {
        let content = "## v1.0.0\n\n### What's Changed\n\n- dash bullet\n* star bullet\n";
        let section = parse(content).unwrap();
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].description, "star bullet");
    }

    #[test]
    fn scope_prefix_is_split_out() {
        let content = "## v1.0.0\n\n### What's Changed\n\n* **api:** new endpoint by @dev in #5\n";
        let section = parse(content).unwrap();
        assert_eq!(section.entries[0].scope.as_deref(), Some("api"));
        assert_eq!(section.entries[0].description, "new endpoint");
    }

    #[test]
    fn section_names_match_case_insensitively() {
        let content = "## v1.0.0\n\n### what's changed\n\n* Entry by @dev in #1\n";
        let section = parse(content).unwrap();
        assert_eq!(section.confidence, Confidence::Low);
    }

    #[test]
    fn empty_section_has_no_confidence() {
        let content = "## v1.0.0\n";
        let section = parse(content).unwrap();
        assert!(!section.has_entries());
        assert_eq!(section.confidence, Confidence::None);
    }

    #[test]
    fn no_version_header_is_structural_error() {
        let content = "### What's Changed\n\n* floating entry\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, ParseError::VersionNotFound));
    }

    #[test]
    fn unrecognized_section_keeps_entries_unclassified() {
        let content = "## v1.0.0\n\n### New Contributors\n\n* @newbie made their first contribution in #3\n";
        let section = parse(content).unwrap();
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].category, None);
        assert_eq!(section.confidence, Confidence::Low);
    }

    #[test]
    fn only_first_release_is_parsed() {
        let content = "\
## v1.1.0

### What's Changed

* current release entry by @dev in #10

## v1.0.0

### What's Changed

* previous release entry by @dev in #2
";
        let section = parse(content).unwrap();
        assert_eq!(section.version, "v1.1.0");
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].description, "current release entry");
    }
}
