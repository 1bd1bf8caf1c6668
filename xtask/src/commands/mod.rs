//! Task implementations

pub mod completions;

pub mod install;

pub mod man;
