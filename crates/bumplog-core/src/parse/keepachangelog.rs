//! Keep a Changelog parser.
//!
//! Scans for the `## [Unreleased]` header (case-insensitive), collects
//! `### Subsection` buckets and their `- ` bullets until the next version
//! header, and maps the canonical subsection names onto categories.
//! Unrecognized subsection names are kept on the entries verbatim but
//! contribute nothing to bump inference.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{Category, Confidence, ParsedEntry, ParsedSection};
use crate::parse::{ParseError, ParseResult};
use crate::version::BumpLevel;

/// `## [Name]` version header.
static SECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+\[([^\]]+)\]").expect("valid regex"));

/// `### Name` subsection header.
static SUBSECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(.+)$").expect("valid regex"));

/// Parse the Unreleased section of a Keep a Changelog document.
pub fn parse_unreleased(input: &mut dyn BufRead) -> ParseResult<ParsedSection> {
    let mut section = ParsedSection::default();
    let mut in_unreleased = false;
    let mut current_subsection = String::new();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if let Some(caps) = SECTION_HEADER_RE.captures(&line) {
            let version_name = &caps[1];
            if version_name.eq_ignore_ascii_case("Unreleased") {
                in_unreleased = true;
                section.version = version_name.to_string();
                continue;
            } else if in_unreleased {
                // Next version header ends the region.
                break;
            }
        }

        if !in_unreleased {
            continue;
        }

        if let Some(caps) = SUBSECTION_HEADER_RE.captures(&line) {
            current_subsection = caps[1].trim().to_string();
            continue;
        }

        if !current_subsection.is_empty()
            && let Some(entry_text) = trimmed.strip_prefix("- ")
        {
            section.entries.push(ParsedEntry {
                description: entry_text.to_string(),
                category: Category::from_section_name(&current_subsection),
                original_section: current_subsection.clone(),
                ..ParsedEntry::default()
            });
        }
    }

    if !in_unreleased {
        return Err(ParseError::UnreleasedNotFound);
    }

    infer_bump_type(&mut section);
    debug!(
        entries = section.entries.len(),
        bump = ?section.inferred_bump,
        confidence = %section.confidence,
        "parsed keepachangelog unreleased section"
    );
    Ok(section)
}

/// Bucket-presence heuristic for this convention.
///
/// `Changed` maps to major at only medium confidence on purpose: in Keep a
/// Changelog practice, "Changed" frequently announces a breaking behavior
/// shift, so the conservative call is major with the uncertainty signalled
/// through the confidence level.
fn infer_bump_type(section: &mut ParsedSection) {
    let has = |cat: Category| section.entries.iter().any(|e| e.category == Some(cat));

    let (bump, confidence) = if has(Category::Removed) {
        (Some(BumpLevel::Major), Confidence::High)
    } else if has(Category::Changed) {
        (Some(BumpLevel::Major), Confidence::Medium)
    } else if has(Category::Added) {
        (Some(BumpLevel::Minor), Confidence::High)
    } else if has(Category::Fixed) || has(Category::Security) || has(Category::Deprecated) {
        (Some(BumpLevel::Patch), Confidence::High)
    } else {
        (None, Confidence::None)
    };

    section.inferred_bump = bump;
    section.confidence = confidence;
}
