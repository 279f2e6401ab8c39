//! Animated SVG output.
//!
//! [`SvgExporter`] draws a [`Topology`] for one [`ViewState`]: the canvas
//! background, optional lane guides, every node, and every connector the
//! view makes visible. Connectors of the current phase are emphasized and
//! carry flow markers; in overview mode every connector carries markers and
//! none is emphasized.

mod connector;
mod node;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use relaymap_core::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeCap, StrokeDefinition},
    lane::Axis,
};

use crate::{
    config::{AppConfig, LayoutConfig},
    export::{Error, Exporter},
    topology::{NodeKind, Topology},
    view::ViewState,
};

use connector::{ConnectorDrawable, FlowMarkers};
use node::NodeDrawable;

/// The fixed default palette.
#[derive(Debug, Clone)]
struct Palette {
    background: Color,
    client: Color,
    relay: Color,
    backend: Color,
    dns_authority: Color,
    cert_authority: Color,
    text: Color,
    marker: Color,
    node_stroke: StrokeDefinition,
    connector: StrokeDefinition,
    active_connector: StrokeDefinition,
    lane: StrokeDefinition,
}

impl Palette {
    fn new(background: Option<Color>) -> Result<Self, String> {
        let background = match background {
            Some(color) => color,
            None => Color::new("white")?,
        };

        let active_connector =
            StrokeDefinition::solid(Color::new("#d53f8c")?, 2.5).with_cap(StrokeCap::Round);

        Ok(Self {
            background,
            client: Color::new("#edf2f7")?,
            relay: Color::new("#bee3f8")?,
            backend: Color::new("#c6f6d5")?,
            dns_authority: Color::new("#fefcbf")?,
            cert_authority: Color::new("#fed7e2")?,
            text: Color::new("#1a202c")?,
            marker: Color::new("#d53f8c")?,
            node_stroke: StrokeDefinition::solid(Color::new("#4a5568")?, 1.5),
            connector: StrokeDefinition::solid(Color::new("#718096")?, 1.5),
            active_connector,
            lane: StrokeDefinition::dashed(Color::new("#a0aec0")?.with_alpha(0.6), 1.0),
        })
    }

    fn fill(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Client => self.client,
            NodeKind::Relay => self.relay,
            NodeKind::Backend => self.backend,
            NodeKind::DnsAuthority => self.dns_authority,
            NodeKind::CertAuthority => self.cert_authority,
        }
    }
}

/// SVG backend for [`Exporter`].
///
/// # Examples
///
/// ```
/// # use relaymap::{config::AppConfig, export::{Exporter, svg::SvgExporter}};
/// # use relaymap::{topology::Topology, view::ViewState};
/// let exporter = SvgExporter::new(&AppConfig::default()).unwrap();
/// let topology = Topology::reference();
/// let view = ViewState::new(2, topology.phase_count());
///
/// let svg = exporter.export(&topology, &view).unwrap();
/// assert!(svg.contains("data-connector=\"acme-order\""));
/// assert!(!svg.contains("data-connector=\"request\""));
/// ```
#[derive(Debug, Clone)]
pub struct SvgExporter {
    layout: LayoutConfig,
    flow_speed: f32,
    palette: Palette,
}

impl SvgExporter {
    /// Creates an exporter from the layout and style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is not a
    /// valid color, or if [`AppConfig::validate`] rejects the configuration.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        config
            .validate()
            .map_err(|err| Error::Render(err.to_string()))?;

        let background = config.style().background_color().map_err(Error::Render)?;
        let palette = Palette::new(background).map_err(Error::Render)?;

        Ok(Self {
            layout: config.layout().clone(),
            flow_speed: config.style().flow_speed(),
            palette,
        })
    }

    fn render_background(&self, topology: &Topology) -> LayeredOutput {
        let canvas = topology.canvas();
        let mut output = LayeredOutput::new();

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("fill", self.palette.background.to_string())
            .set("fill-opacity", self.palette.background.alpha());
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        if self.layout.show_lanes() {
            for lane in topology.lanes() {
                let start = lane.point_at(0.0);
                let end = match lane.axis() {
                    Axis::Horizontal => lane.point_at(canvas.width()),
                    Axis::Vertical => lane.point_at(canvas.height()),
                };
                let guide = svg_element::Line::new()
                    .set("data-lane", lane.name())
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y());
                let guide = apply_stroke!(guide, &self.palette.lane);
                output.add_to_layer(RenderLayer::Lane, Box::new(guide));
            }
        }

        output
    }

    fn render_title(&self, topology: &Topology, view: &ViewState) -> LayeredOutput {
        let title = if view.overview() {
            "Overview".to_string()
        } else {
            match topology.phase(view.phase()) {
                Some(phase) => format!(
                    "Phase {} of {}: {}",
                    view.phase(),
                    topology.phase_count(),
                    phase.title()
                ),
                None => format!("Phase {}", view.phase()),
            }
        };

        let text = svg_element::Text::new(title)
            .set("class", "title")
            .set("x", 16)
            .set("y", 24)
            .set("font-family", "sans-serif")
            .set("font-size", 16)
            .set("font-weight", "bold")
            .set("fill", self.palette.text.to_string());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(text));
        output
    }

    fn render_document(&self, topology: &Topology, view: &ViewState) -> Result<Document, Error> {
        let canvas = topology.canvas();
        let mut output = self.render_background(topology);

        for (name, node) in topology.nodes() {
            let drawable = NodeDrawable::new(
                name,
                node,
                self.palette.fill(node.kind()),
                &self.palette.node_stroke,
                self.palette.text,
            );
            output.merge(drawable.render_to_layers());
        }

        let routes = topology
            .routes(self.layout.standoff_distance())
            .map_err(|err| Error::Render(err.to_string()))?;

        let mut visible = 0;
        for routed in routes.iter().filter(|r| view.is_visible(r.spec())) {
            visible += 1;
            let stroke = if view.is_active(routed.spec()) {
                &self.palette.active_connector
            } else {
                &self.palette.connector
            };

            let mut drawable = ConnectorDrawable::new(routed, stroke, self.palette.text);
            if view.is_animated(routed.spec()) {
                drawable = drawable.with_markers(FlowMarkers::new(
                    self.palette.marker,
                    routed.path().length(),
                    self.flow_speed,
                ));
            }
            output.merge(drawable.render_to_layers());
        }

        output.merge(self.render_title(topology, view));
        debug!(
            phase = view.phase(),
            overview = view.overview(),
            visible,
            hidden = routes.len() - visible;
            "Connectors filtered"
        );

        let mut document = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        for group in output.render() {
            document = document.add(group);
        }

        Ok(document)
    }
}

impl Exporter for SvgExporter {
    fn export(&self, topology: &Topology, view: &ViewState) -> Result<String, Error> {
        let document = self.render_document(topology, view)?;
        info!(phase = view.phase(), overview = view.overview(); "SVG document rendered");
        Ok(document.to_string())
    }
}
