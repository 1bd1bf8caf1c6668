//! Minimal-format parser.
//!
//! The minimal convention is a flat list of `- [Type] description` lines
//! under a `## X.Y.Z` header. The bracketed type token carries all the
//! classification signal, so inference here is a straight lookup table
//! rather than a section heuristic.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{Category, Confidence, ParsedEntry, ParsedSection};
use crate::parse::{ParseError, ParseResult};
use crate::version::BumpLevel;

/// `## X.Y.Z...` version header, optional `v` prefix excluded from capture.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+v?(\d+\.\d+\.\d+.*)$").expect("valid regex"));

/// `- [Type] description` entry line.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+\[(\w+)\]\s+(.+)$").expect("valid regex"));

/// Fixed type-token table: `(token, category, bump weight)`.
///
/// Tokens match case-sensitively, as authored. `Breaking` is the only path
/// to a major weight, and additionally flags the entry as breaking.
const TYPE_MAPPING: &[(&str, Option<Category>, Option<BumpLevel>)] = &[
    ("Feat", Some(Category::Added), Some(BumpLevel::Minor)),
    ("Fix", Some(Category::Fixed), Some(BumpLevel::Patch)),
    ("Breaking", Some(Category::Removed), Some(BumpLevel::Major)),
    ("Perf", Some(Category::Changed), Some(BumpLevel::Patch)),
    ("Refactor", Some(Category::Changed), None),
    ("Docs", None, None),
    ("Test", None, None),
    ("Chore", None, None),
    ("CI", None, None),
    ("Build", None, None),
    ("Revert", Some(Category::Removed), Some(BumpLevel::Patch)),
    ("Style", None, None),
    ("Other", None, None),
];

fn lookup_type(token: &str) -> Option<(Option<Category>, Option<BumpLevel>)> {
    TYPE_MAPPING
        .iter()
        .find(|(name, _, _)| *name == token)
        .map(|(_, cat, bump)| (*cat, *bump))
}

/// True when a line looks like a minimal-format entry.
///
/// Used by format detection as the distinguishing lexical signal.
pub(crate) fn is_entry_line(line: &str) -> bool {
    ENTRY_RE.is_match(line)
}

/// Parse the first (topmost, i.e. unreleased) version section.
pub fn parse_unreleased(input: &mut dyn BufRead) -> ParseResult<ParsedSection> {
    let mut section = ParsedSection::default();
    let mut in_first_section = false;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if let Some(caps) = VERSION_RE.captures(trimmed) {
            if in_first_section {
                break;
            }
            section.version = caps[1].to_string();
            in_first_section = true;
            continue;
        }

        if !in_first_section {
            continue;
        }

        if let Some(caps) = ENTRY_RE.captures(trimmed) {
            section.entries.push(parse_entry(&caps[1], &caps[2]));
        }
    }

    if !in_first_section {
        return Err(ParseError::VersionNotFound);
    }

    infer_bump_type(&mut section);
    debug!(
        version = %section.version,
        entries = section.entries.len(),
        bump = ?section.inferred_bump,
        "parsed minimal section"
    );
    Ok(section)
}

fn parse_entry(type_token: &str, description: &str) -> ParsedEntry {
    let category = lookup_type(type_token).and_then(|(cat, _)| cat);

    ParsedEntry {
        description: description.to_string(),
        category,
        original_section: type_token.to_string(),
        commit_type: Some(type_token.to_lowercase()),
        is_breaking: type_token == "Breaking",
        ..ParsedEntry::default()
    }
}

/// Take the maximum mapped bump weight, with `Breaking` trumping everything.
fn infer_bump_type(section: &mut ParsedSection) {
    if section.entries.is_empty() {
        section.confidence = Confidence::None;
        return;
    }

    if section.entries.iter().any(|e| e.is_breaking) {
        section.inferred_bump = Some(BumpLevel::Major);
        section.confidence = Confidence::High;
        return;
    }

    let max_bump = section
        .entries
        .iter()
        .filter_map(|e| lookup_type(&e.original_section))
        .filter_map(|(_, bump)| bump)
        .max();

    match max_bump {
        Some(bump) => {
            section.inferred_bump = Some(bump);
            section.confidence = Confidence::High;
        }
        // Entries exist but none carry a mapped weight.
        None => section.confidence = Confidence::None,
    }
}
