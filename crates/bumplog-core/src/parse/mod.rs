//! Changelog parsing — formats, detection, and the parser family.
//!
//! Four concrete grammars are supported, plus an auto mode that buffers
//! the input, runs [`detect_format`], and re-parses with the winner. The
//! format set is closed on purpose: dispatch is a tagged enum behind one
//! contract (`format()` + `parse_unreleased()`), and the only user
//! extension point is the grouped format's section map.
//!
//! Every parse call reads the supplied stream once and returns a fresh
//! [`ParsedSection`]; no state survives between invocations.

mod clean;
mod detect;
mod github;
mod grouped;
mod keepachangelog;
mod minimal;
pub mod sections;

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use detect::detect_format;
pub use sections::SectionMapper;

use crate::config::ChangelogConfig;
use crate::model::ParsedSection;

/// Errors from changelog parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No case-insensitive `## [Unreleased]` header before end of input.
    #[error("unreleased section not found in changelog")]
    UnreleasedNotFound,

    /// No version header of the expected shape before end of input.
    #[error("no version section found in changelog")]
    VersionNotFound,

    /// Unrecognized `format` configuration value, raised at construction.
    #[error("unknown changelog format: {0}")]
    UnknownFormat(String),

    /// The input stream failed mid-read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A supported changelog convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Keep a Changelog: `## [Unreleased]` + `### Added`-style buckets.
    KeepAChangelog,
    /// Flat `- [Type] description` lists.
    Minimal,
    /// Conventional-commit generator output: icon sections, scoped bullets.
    Grouped,
    /// GitHub release notes: "What's Changed" with `* ` bullets.
    GitHub,
    /// Buffer, detect, and delegate.
    Auto,
}

impl Format {
    /// Returns the format as its configuration string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::KeepAChangelog => "keepachangelog",
            Self::Minimal => "minimal",
            Self::Grouped => "grouped",
            Self::GitHub => "github",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keepachangelog" => Ok(Self::KeepAChangelog),
            "minimal" => Ok(Self::Minimal),
            "grouped" => Ok(Self::Grouped),
            "github" => Ok(Self::GitHub),
            "auto" => Ok(Self::Auto),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// One parser per supported convention, dispatched as a closed variant set.
///
/// Constructed through [`ChangelogParser::from_config`] (which validates the
/// configured format string) or [`ChangelogParser::new`] (format already
/// known). Holds only immutable per-run data, so a single value can serve
/// any number of `parse_unreleased` calls.
#[derive(Debug, Clone)]
pub enum ChangelogParser {
    /// Keep a Changelog grammar.
    KeepAChangelog,
    /// Minimal `- [Type]` grammar.
    Minimal,
    /// Grouped grammar with its merged section map.
    Grouped(SectionMapper),
    /// GitHub release-notes grammar.
    GitHub,
    /// Detect-then-delegate; keeps the section-map overrides around for
    /// the case where detection lands on grouped.
    Auto {
        /// User section-map overrides, applied if detection picks grouped.
        overrides: HashMap<String, String>,
    },
}

impl ChangelogParser {
    /// Construct the parser named by `config.format`.
    ///
    /// An unrecognized format value fails here, before any input is read.
    pub fn from_config(config: &ChangelogConfig) -> ParseResult<Self> {
        let format = Format::from_str(&config.format)?;
        Ok(Self::new(format, config))
    }

    /// Construct a parser for a known format.
    pub fn new(format: Format, config: &ChangelogConfig) -> Self {
        match format {
            Format::KeepAChangelog => Self::KeepAChangelog,
            Format::Minimal => Self::Minimal,
            Format::Grouped => Self::Grouped(SectionMapper::with_overrides(
                &config.grouped_section_map,
            )),
            Format::GitHub => Self::GitHub,
            Format::Auto => Self::Auto {
                overrides: config.grouped_section_map.clone(),
            },
        }
    }

    /// The format this parser handles.
    pub const fn format(&self) -> Format {
        match self {
            Self::KeepAChangelog => Format::KeepAChangelog,
            Self::Minimal => Format::Minimal,
            Self::Grouped(_) => Format::Grouped,
            Self::GitHub => Format::GitHub,
            Self::Auto { .. } => Format::Auto,
        }
    }

    /// Parse the unreleased (topmost) section from `input`.
    ///
    /// Structural failures ("no marker found") are distinct from a
    /// successfully parsed but empty section; callers must not conflate
    /// the two.
    pub fn parse_unreleased(&self, input: &mut dyn BufRead) -> ParseResult<ParsedSection> {
        match self {
            Self::KeepAChangelog => keepachangelog::parse_unreleased(input),
            Self::Minimal => minimal::parse_unreleased(input),
            Self::Grouped(mapper) => grouped::parse_unreleased(input, mapper),
            Self::GitHub => github::parse_unreleased(input),
            Self::Auto { overrides } => {
                // Buffer once, detect, then re-parse the same bytes through
                // a fresh view so the chosen parser sees everything.
                let mut content = String::new();
                input.read_to_string(&mut content)?;

                let format = detect_format(&content);
                let parser = match format {
                    Format::Grouped => {
                        Self::Grouped(SectionMapper::with_overrides(overrides))
                    }
                    Format::KeepAChangelog => Self::KeepAChangelog,
                    Format::Minimal => Self::Minimal,
                    Format::GitHub => Self::GitHub,
                    // detect_format never returns Auto
                    Format::Auto => Self::KeepAChangelog,
                };
                parser.parse_unreleased(&mut content.as_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::version::BumpLevel;

    fn config_with_format(format: &str) -> ChangelogConfig {
        ChangelogConfig {
            format: format.to_string(),
            ..ChangelogConfig::default()
        }
    }

    #[test]
    fn factory_builds_each_known_format() {
        for name in ["keepachangelog", "minimal", "grouped", "github", "auto"] {
            let parser = ChangelogParser::from_config(&config_with_format(name)).unwrap();
            assert_eq!(parser.format().as_str(), name);
        }
    }

    #[test]
    fn factory_rejects_unknown_format() {
        let err = ChangelogParser::from_config(&config_with_format("asciidoc")).unwrap_err();
        match err {
            ParseError::UnknownFormat(name) => assert_eq!(name, "asciidoc"),
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn format_round_trips_through_strings() {
        for format in [
            Format::KeepAChangelog,
            Format::Minimal,
            Format::Grouped,
            Format::GitHub,
            Format::Auto,
        ] {
            assert_eq!(format.as_str().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn auto_parser_delegates_to_detected_format() {
        let parser = ChangelogParser::from_config(&config_with_format("auto")).unwrap();

        let keepachangelog = "## [Unreleased]\n\n### Added\n\n- New thing\n";
        let section = parser
            .parse_unreleased(&mut keepachangelog.as_bytes())
            .unwrap();
        assert_eq!(section.inferred_bump, Some(BumpLevel::Minor));

        let minimal = "## v1.0.0\n\n- [Breaking] Gone\n";
        let section = parser.parse_unreleased(&mut minimal.as_bytes()).unwrap();
        assert!(section.entries[0].is_breaking);
    }

    #[test]
    fn auto_parser_applies_grouped_overrides() {
        let mut config = config_with_format("auto");
        config
            .grouped_section_map
            .insert("Internals".to_string(), "Changed".to_string());
        let parser = ChangelogParser::from_config(&config).unwrap();

        let content = "## v1.0.0\n\n### Internals\n\n- rewired everything\n";
        let section = parser.parse_unreleased(&mut content.as_bytes()).unwrap();
        assert_eq!(section.entries[0].category, Some(Category::Changed));
    }

    #[test]
    fn auto_parser_reports_auto_format() {
        let parser = ChangelogParser::from_config(&config_with_format("auto")).unwrap();
        assert_eq!(parser.format(), Format::Auto);
    }

    #[test]
    fn each_parser_fails_structurally_on_unmarked_input() {
        let content = "just some prose\nwith no headers at all\n";
        for name in ["keepachangelog", "minimal", "grouped", "github"] {
            let parser = ChangelogParser::from_config(&config_with_format(name)).unwrap();
            let err = parser.parse_unreleased(&mut content.as_bytes()).unwrap_err();
            assert!(
                matches!(
                    err,
                    ParseError::UnreleasedNotFound | ParseError::VersionNotFound
                ),
                "{name}: expected structural error, got {err:?}"
            );
        }
    }

    #[test]
    fn parser_is_reusable_across_calls() {
        let parser = ChangelogParser::from_config(&config_with_format("minimal")).unwrap();
        let content = "## v1.0.0\n\n- [Feat] X\n";

        let first = parser.parse_unreleased(&mut content.as_bytes()).unwrap();
        let second = parser.parse_unreleased(&mut content.as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}
