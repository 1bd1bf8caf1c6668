//! Core library for bumplog.
//!
//! This crate provides the foundational types and functionality used by the
//! `bumplog` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`analyzer`] - High-level changelog analysis and bump inference
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`model`] - Parsed changelog data model
//! - [`parse`] - Format detection and the per-format parsers
//! - [`registry`] - Single-slot analyzer binding for embedders
//! - [`version`] - Bump levels and version computation
//!
//! # Quick Start
//!
//! ```no_run
//! use bumplog_core::analyzer::ChangelogAnalyzer;
//! use bumplog_core::{Config, ConfigLoader};
//!
//! let config = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let analyzer = ChangelogAnalyzer::new(config.changelog);
//! if analyzer.is_enabled() {
//!     println!("Inferred bump: {:?}", analyzer.infer_bump_type());
//! }
//! ```
#![deny(unsafe_code)]

pub mod analyzer;

pub mod config;

pub mod error;

pub mod model;

pub mod parse;

pub mod registry;

pub mod version;

pub use analyzer::ChangelogAnalyzer;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult};

// Re-export semver so downstream crates don't need a direct dependency.
pub use semver;
