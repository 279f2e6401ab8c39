//! Error adapter for converting RelaymapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's diagnostic formatting used in the CLI. Each error variant
//! gets a stable code and, where there is something useful to say, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use relaymap::RelaymapError;

/// Adapter for rendering a [`RelaymapError`] with miette.
pub struct ErrorAdapter<'a>(pub &'a RelaymapError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RelaymapError::Io(_) => "relaymap::io",
            RelaymapError::Config(_) => "relaymap::config",
            RelaymapError::Layout(_) => "relaymap::layout",
            RelaymapError::Violations { .. } => "relaymap::layout_violation",
            RelaymapError::Export(_) => "relaymap::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            RelaymapError::Violations { .. } => {
                "move the lane or waypoints into free space, or unset `layout.strict_lanes`"
            }
            RelaymapError::Layout(_) => {
                "check node names, sizes and connector phases in the layout file"
            }
            RelaymapError::Config(_) => {
                "see `relaymap --help` for the configuration search order"
            }
            RelaymapError::Io(_) | RelaymapError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
