//! Error types for Relaymap operations.
//!
//! This module provides the main error type [`RelaymapError`] which wraps
//! the error conditions that can occur while loading a topology and
//! rendering it.

use std::io;

use thiserror::Error;

use crate::topology::LayoutViolation;

/// The main error type for Relaymap operations.
///
/// The geometry core never fails: degenerate inputs have defined results.
/// Errors only come from the edges of the system, loading a topology or
/// configuration and writing output.
#[derive(Debug, Error)]
pub enum RelaymapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    /// Lanes or routes cut through node bodies and `strict_lanes` is set.
    #[error("Layout violation: {first} ({count} violation(s) in total)")]
    Violations { first: LayoutViolation, count: usize },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for RelaymapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
