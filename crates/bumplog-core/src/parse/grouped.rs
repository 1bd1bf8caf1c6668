//! Grouped-format parser.
//!
//! The grouped convention is what conventional-commit changelog generators
//! emit: `## v1.2.0 - 2024-05-01` version headers, `### 🚀 Features`
//! section headers (icon optional), and `- `/`* ` bullets, often decorated
//! with scopes and commit/PR links. Section names are classified through a
//! [`SectionMapper`], so this is the one format with a user extension
//! point.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{Category, Confidence, ParsedEntry, ParsedSection};
use crate::parse::clean;
use crate::parse::sections::{SectionMapper, strip_section_icon};
use crate::parse::{ParseError, ParseResult};
use crate::version::BumpLevel;

/// `## v1.2.3[-suffix] [- date]` version header.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+(v?\d+\.\d+\.\d+\S*)\s*(?:-\s*(.+))?$").expect("valid regex")
});

/// `### Name` section header.
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(.+)$").expect("valid regex"));

/// Parse the first (topmost) version section of a grouped changelog.
pub fn parse_unreleased(
    input: &mut dyn BufRead,
    mapper: &SectionMapper,
) -> ParseResult<ParsedSection> {
    let mut section = ParsedSection::default();
    let mut in_first_version = false;
    let mut current_section = String::new();
    let mut is_breaking_section = false;

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
            current_section = strip_section_icon(caps[1].trim()).to_string();
            is_breaking_section = current_section.eq_ignore_ascii_case("Breaking Changes");
            continue;
        }

        if !current_section.is_empty()
            && (trimmed.starts_with("- ") || trimmed.starts_with("* "))
        {
            section.entries.push(parse_entry(
                trimmed,
                &current_section,
                is_breaking_section,
                mapper,
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
        bump = ?section.inferred_bump,
        "parsed grouped section"
    );
    Ok(section)
}

/// Extract one entry: scope split, then link stripping, in that order.
fn parse_entry(
    line: &str,
    section_name: &str,
    is_breaking: bool,
    mapper: &SectionMapper,
) -> ParsedEntry {
    let mut entry = ParsedEntry {
        original_section: section_name.to_string(),
        category: mapper.category(section_name),
        is_breaking,
        ..ParsedEntry::default()
    };

    let mut content = line.trim_start_matches(['-', '*', ' ']).to_string();

    if let Some((scope, rest)) = clean::split_scope(line) {
        entry.scope = Some(scope);
        content = rest;
    }

    let content = clean::strip_commit_link(&content);
    let content = clean::strip_pr_link(&content);
    let content = clean::flatten_markdown_links(&content);
    entry.description = content.trim().to_string();

    entry
}

/// Category-presence heuristic, shared shape with the Keep a Changelog one
/// plus the explicit breaking-section flag.
fn infer_bump_type(section: &mut ParsedSection) {
    if section.entries.is_empty() {
        section.confidence = Confidence::None;
        return;
    }

    let has_breaking = section.entries.iter().any(|e| e.is_breaking);
    let has = |cat: Category| section.entries.iter().any(|e| e.category == Some(cat));

    if has_breaking || has(Category::Removed) {
        section.inferred_bump = Some(BumpLevel::Major);
        section.confidence = Confidence::High;
    } else if has(Category::Changed) {
        section.inferred_bump = Some(BumpLevel::Major);
        section.confidence = Confidence::Medium;
    } else if has(Category::Added) {
        section.inferred_bump = Some(BumpLevel::Minor);
        section.confidence = Confidence::High;
    } else if has(Category::Fixed) || has(Category::Security) || has(Category::Deprecated) {
        section.inferred_bump = Some(BumpLevel::Patch);
        section.confidence = Confidence::High;
    } else {
        // Entries exist but none classified.
        section.confidence = Confidence::Low;
    }
}
