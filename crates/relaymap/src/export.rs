//! Export functionality for Relaymap diagrams.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! rendering pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Layout file (or reference topology)
//!     ↓ load + validate
//! Topology
//!     ↓ route (per connector, with standoffs)
//! Paths
//!     ↓ export (this module), filtered by ViewState
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — animated SVG via [`svg::SvgExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`RelaymapError::Export`] at the crate
//! boundary.
//!
//! [`RelaymapError::Export`]: crate::RelaymapError::Export

/// SVG export backend.
pub mod svg;

use std::{fs, path::Path};

use log::{error, info};

use crate::{topology::Topology, view::ViewState};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `topology` as seen through `view`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the topology cannot be drawn, for example
    /// when a connector references a node that does not exist.
    fn export(&self, topology: &Topology, view: &ViewState) -> Result<String, Error>;

    /// Renders `topology` and writes the result to `path`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Exporter::export`], or [`Error::Io`] if the
    /// file cannot be written.
    fn export_to_file(
        &self,
        topology: &Topology,
        view: &ViewState,
        path: &Path,
    ) -> Result<(), Error> {
        let document = self.export(topology, view)?;

        info!(path:? = path; "Writing diagram");
        fs::write(path, document).map_err(|err| {
            error!(path:? = path, err:err; "Failed to write diagram");
            Error::Io(err)
        })
    }
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`RelaymapError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`RelaymapError::Export`]: crate::RelaymapError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
