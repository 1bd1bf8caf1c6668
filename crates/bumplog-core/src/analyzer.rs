//! Changelog analysis — the high-level entry point over the parser family.
//!
//! [`ChangelogAnalyzer`] wraps a [`ChangelogConfig`] and answers the
//! questions callers actually ask: is changelog-driven inference on, which
//! bump does the unreleased section imply, and does the section have
//! content at all. File access and parser construction live here so
//! callers never touch the parsing layer directly.

use std::fs::File;
use std::io::BufReader;

use camino::Utf8Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{ChangelogConfig, Priority};
use crate::model::{Confidence, ParsedSection};
use crate::parse::{ChangelogParser, ParseError};
use crate::version::BumpLevel;

/// Errors from changelog analysis.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Analysis was requested while the feature is switched off.
    #[error("changelog parser not enabled or inference disabled")]
    Disabled,

    /// The configured changelog path does not exist.
    #[error("changelog file not found")]
    FileNotFound,

    /// The changelog exists but could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Parsing succeeded but no bump type could be inferred.
    #[error("no bump type could be inferred from changelog")]
    NoBumpType,

    /// The unreleased section exists but holds no entries.
    #[error("unreleased section has no entries")]
    NoEntries,

    /// Reading the changelog failed for a reason other than absence.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Analyzes a project changelog according to its configuration.
#[derive(Debug, Clone)]
pub struct ChangelogAnalyzer {
    config: ChangelogConfig,
}

impl ChangelogAnalyzer {
    /// Create an analyzer, normalizing blank config fields to defaults.
    pub fn new(config: ChangelogConfig) -> Self {
        let mut config = config;
        if config.path.is_empty() {
            config.path = ChangelogConfig::default().path;
        }
        if config.format.is_empty() {
            config.format = ChangelogConfig::default().format;
        }
        Self { config }
    }

    /// The effective (normalized) configuration.
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Whether changelog analysis is switched on at all.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// The configured format name.
    pub fn format(&self) -> &str {
        &self.config.format
    }

    /// Whether the changelog should win over other bump sources.
    pub fn should_take_precedence(&self) -> bool {
        self.config.enabled && self.config.priority == Priority::Changelog
    }

    /// Parse the unreleased section of the configured changelog.
    #[instrument(skip(self), fields(path = %self.config.path, format = %self.config.format))]
    pub fn parse(&self) -> AnalyzerResult<ParsedSection> {
        let parser = ChangelogParser::from_config(&self.config)?;
        let mut reader = open_changelog(Utf8Path::new(&self.config.path))?;
        let section = parser.parse_unreleased(&mut reader)?;
        debug!(
            version = %section.version,
            entries = section.entries.len(),
            "parsed unreleased section"
        );
        Ok(section)
    }

    /// Infer the bump level, failing when nothing can be concluded.
    ///
    /// Fails with [`AnalyzerError::Disabled`] before touching the
    /// filesystem when analysis or inference is switched off.
    pub fn infer_bump_type(&self) -> AnalyzerResult<BumpLevel> {
        if !self.config.enabled || !self.config.infer_bump_type {
            return Err(AnalyzerError::Disabled);
        }
        let section = self.parse()?;
        section.inferred_bump.ok_or(AnalyzerError::NoBumpType)
    }

    /// Infer the bump level along with the parser's confidence.
    ///
    /// Unlike [`infer_bump_type`](Self::infer_bump_type), an inconclusive
    /// parse is a successful `(None, confidence)` answer here, letting
    /// callers decide how much to trust a weak signal.
    pub fn infer_bump_type_with_confidence(
        &self,
    ) -> AnalyzerResult<(Option<BumpLevel>, Confidence)> {
        if !self.config.enabled || !self.config.infer_bump_type {
            return Err(AnalyzerError::Disabled);
        }
        let section = self.parse()?;
        Ok((section.inferred_bump, section.confidence))
    }

    /// Enforce the require-unreleased-section policy.
    ///
    /// A no-op when analysis is off or the policy is disabled. Otherwise
    /// the unreleased section must parse and hold at least one entry.
    pub fn validate_has_entries(&self) -> AnalyzerResult<()> {
        if !self.config.enabled || !self.config.require_unreleased_section {
            return Ok(());
        }
        let section = self.parse()?;
        if !section.has_entries() {
            return Err(AnalyzerError::NoEntries);
        }
        Ok(())
    }
}

/// Open the changelog for buffered reading, mapping absence to
/// [`AnalyzerError::FileNotFound`].
fn open_changelog(path: &Utf8Path) -> AnalyzerResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AnalyzerError::FileNotFound),
        Err(e) => Err(AnalyzerError::Io(e)),
    }
}
