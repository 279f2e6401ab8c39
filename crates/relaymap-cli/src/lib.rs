//! CLI logic for the Relaymap diagram tool.
//!
//! This module contains the core CLI logic for the Relaymap diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use relaymap::{DiagramBuilder, RelaymapError, topology::Topology, view::ViewState};

/// Run the Relaymap CLI application
///
/// Loads the configuration and topology, then renders the requested view
/// (or every view with `--all-phases`) to SVG.
///
/// # Errors
///
/// Returns `RelaymapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid layouts
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), RelaymapError> {
    info!(
        layout_path:? = args.layout,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    let topology = match &args.layout {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            builder.load_topology(&source)?
        }
        None => {
            info!("No layout file given, using the reference topology");
            Topology::reference()
        }
    };

    let output = Path::new(&args.output);
    let view = ViewState::new(args.phase, topology.phase_count());

    if args.all_phases {
        let mut view = ViewState::new(1, topology.phase_count());
        for phase in 1..=topology.phase_count() {
            let path = sibling_path(output, &format!("phase-{phase}"));
            write_view(&builder, &topology, &view, &path)?;
            view = view.next();
        }
        write_view(
            &builder,
            &topology,
            &view.with_overview(true),
            &sibling_path(output, "overview"),
        )?;
    } else {
        write_view(&builder, &topology, &view.with_overview(args.overview), output)?;
    }

    Ok(())
}

fn write_view(
    builder: &DiagramBuilder,
    topology: &Topology,
    view: &ViewState,
    path: &Path,
) -> Result<(), RelaymapError> {
    let svg = builder.render_svg(topology, view)?;
    fs::write(path, svg)?;

    info!(
        output_file:? = path,
        phase = view.phase(),
        overview = view.overview();
        "SVG exported successfully"
    );
    Ok(())
}

/// `out.svg` with suffix `phase-2` becomes `out-phase-2.svg`.
fn sibling_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "relaymap".to_string());
    let extension = output
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svg".to_string());

    output.with_file_name(format!("{stem}-{suffix}.{extension}"))
}
