//! Parsed-changelog data model.
//!
//! These are the values the parsing engine produces. A [`ParsedSection`] is
//! built fresh on every parse call — nothing here persists between
//! invocations, and nothing is mutated after a parse returns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::BumpLevel;

/// Canonical change classification, following Keep a Changelog.
///
/// Entries that cannot be classified carry `Option::<Category>::None`
/// rather than a seventh variant; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality.
    Added,
    /// Changes to existing functionality.
    Changed,
    /// Functionality slated for removal.
    Deprecated,
    /// Removed functionality.
    Removed,
    /// Bug fixes.
    Fixed,
    /// Vulnerability fixes.
    Security,
}

impl Category {
    /// Parse a raw section/heading name, case-insensitively.
    ///
    /// Returns `None` for anything outside the six canonical names.
    pub fn from_section_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "added" => Some(Self::Added),
            "changed" => Some(Self::Changed),
            "deprecated" => Some(Self::Deprecated),
            "removed" => Some(Self::Removed),
            "fixed" => Some(Self::Fixed),
            "security" => Some(Self::Security),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        };
        write!(f, "{s}")
    }
}

/// Qualitative trust in an inferred bump type.
///
/// Advisory only — confidence ranks how much the heuristic can be trusted
/// and must never gate behavior downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// No basis for inference (empty section, or nothing classifiable).
    #[default]
    None,
    /// Entries exist but carry little type information.
    Low,
    /// Inference rests on a deliberately conservative heuristic.
    Medium,
    /// Inference rests on an explicit marker or unambiguous category.
    High,
}

impl Confidence {
    /// Returns the confidence as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change entry extracted from a changelog section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEntry {
    /// Cleaned prose (links, authors, and PR references removed).
    pub description: String,
    /// Canonical classification, or `None` when unclassifiable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// The raw heading or type-prefix token as authored, pre-mapping.
    pub original_section: String,
    /// Short label from a bolded-scope prefix (e.g. `**auth:** ...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Lower-cased type prefix (populated only by the minimal format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,
    /// Whether the entry is explicitly or structurally marked breaking.
    pub is_breaking: bool,
}

/// The normalized result of one parse call.
///
/// Entry order always equals document order; parsers only ever append.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedSection {
    /// Raw version token as it appeared in the source (may keep a leading `v`).
    pub version: String,
    /// Free-text date captured alongside the version header, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Entries in document order.
    pub entries: Vec<ParsedEntry>,
    /// Inferred semver bump, or `None` when no bump could be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_bump: Option<BumpLevel>,
    /// How much to trust `inferred_bump`. Informational, never a gate.
    pub confidence: Confidence,
}

impl ParsedSection {
    /// True iff the parse produced at least one entry.
    ///
    /// A present-but-empty section is a valid, non-error outcome; this is
    /// how callers tell the two apart from a structural parse failure.
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }
}
