//! Analyzer registry — an explicit, single-slot binding.
//!
//! Some embedders want one process-wide changelog analyzer they configure
//! once and consult from several call sites. Rather than a global mutable
//! singleton, the binding is an owned value the embedder constructs and
//! threads where needed; double registration is an error instead of a
//! silent overwrite.

use thiserror::Error;
use tracing::debug;

use crate::analyzer::ChangelogAnalyzer;

/// Errors from registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A second analyzer was registered without clearing the first.
    #[error("changelog analyzer already registered")]
    AlreadyBound,
}

/// Holds at most one [`ChangelogAnalyzer`].
#[derive(Debug, Default)]
pub struct AnalyzerRegistry {
    analyzer: Option<ChangelogAnalyzer>,
}

impl AnalyzerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an analyzer. Fails if one is already bound.
    pub fn register(&mut self, analyzer: ChangelogAnalyzer) -> Result<(), RegistryError> {
        if self.analyzer.is_some() {
            return Err(RegistryError::AlreadyBound);
        }
        debug!(format = analyzer.format(), "registered changelog analyzer");
        self.analyzer = Some(analyzer);
        Ok(())
    }

    /// The bound analyzer, if any.
    pub fn get(&self) -> Option<&ChangelogAnalyzer> {
        self.analyzer.as_ref()
    }

    /// Whether an analyzer is bound.
    pub fn is_bound(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Drop the binding, allowing a new registration.
    pub fn clear(&mut self) {
        self.analyzer = None;
    }
}
