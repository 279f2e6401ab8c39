//! Relaymap - animated walkthrough diagrams of tunnelled relay topologies.
//!
//! A topology is a fixed table of node rectangles, shared bus lanes and
//! connectors. Each connector is routed port to port through its lane
//! waypoints and belongs to a phase; the diagram is rendered one phase at a
//! time, or as an overview, with animated markers showing traffic flow.

pub mod config;
pub mod export;
pub mod topology;
pub mod view;

mod error;

pub use relaymap_core::{color, draw, geometry, lane, path, route};

pub use error::RelaymapError;

use log::{debug, info, warn};

use config::AppConfig;
use export::{Exporter, svg::SvgExporter};
use topology::Topology;
use view::ViewState;

/// Builder for loading and rendering Relaymap diagrams.
///
/// # Examples
///
/// ```rust
/// use relaymap::{DiagramBuilder, config::AppConfig, topology::Topology, view::ViewState};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let topology = Topology::reference();
///
/// let view = ViewState::new(1, topology.phase_count());
/// let svg = builder.render_svg(&topology, &view)
///     .expect("Failed to render");
/// assert!(svg.contains("data-connector=\"tunnel\""));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a layout file into a validated topology.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Config`] for malformed TOML and
    /// [`RelaymapError::Layout`] for a topology that fails validation.
    pub fn load_topology(&self, source: &str) -> Result<Topology, RelaymapError> {
        info!("Loading topology");
        let topology = Topology::from_toml_str(source)?;
        debug!(phases = topology.phase_count(); "Topology parsed successfully");
        Ok(topology)
    }

    /// Check a topology for lanes and routes that cut through node bodies.
    ///
    /// Violations are logged as warnings. With `strict_lanes` enabled the
    /// first violation is returned as an error instead.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Config`] if the configuration is invalid,
    /// [`RelaymapError::Layout`] if the topology is invalid, or
    /// [`RelaymapError::Violations`] if `strict_lanes` is set and a violation
    /// is found.
    pub fn check_layout(&self, topology: &Topology) -> Result<(), RelaymapError> {
        self.config.validate()?;
        topology.check_structure()?;

        let layout = self.config.layout();
        let mut violations = topology.check_lanes(layout.standoff_distance())?;
        if violations.is_empty() {
            debug!("Layout check passed");
            return Ok(());
        }

        for violation in &violations {
            warn!(violation:% = violation; "Layout violation");
        }

        if layout.strict_lanes() {
            let count = violations.len();
            let first = violations.swap_remove(0);
            return Err(RelaymapError::Violations { first, count });
        }

        Ok(())
    }

    /// Render one view of a topology to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DiagramBuilder::check_layout`], or
    /// [`RelaymapError::Export`] if rendering fails.
    pub fn render_svg(
        &self,
        topology: &Topology,
        view: &ViewState,
    ) -> Result<String, RelaymapError> {
        self.check_layout(topology)?;

        info!(phase = view.phase(), overview = view.overview(); "Rendering diagram");
        let exporter = SvgExporter::new(&self.config)?;
        let svg = exporter.export(topology, view)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
