//! Command-line argument definitions for the Relaymap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the topology, the phase to show, the
//! output path, the configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the Relaymap diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML layout file. The built-in reference topology is used
    /// when omitted.
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Phase to render, starting at 1. Out-of-range values are clamped.
    #[arg(short, long, default_value_t = 1)]
    pub phase: usize,

    /// Render every phase at once without emphasis
    #[arg(long, conflicts_with = "all_phases")]
    pub overview: bool,

    /// Render every phase and the overview, one file each, next to the output
    /// path (`out-phase-1.svg`, ..., `out-overview.svg`)
    #[arg(long)]
    pub all_phases: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
