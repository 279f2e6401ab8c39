//! Topology model: nodes, lanes, phases and connectors.
//!
//! A [`Topology`] is the static layout table the diagram is drawn from. It
//! can be loaded from TOML or taken from [`Topology::reference`], the
//! built-in relay/backend walkthrough.
//!
//! # Layout file format
//!
//! ```toml
//! [canvas]
//! width = 960
//! height = 460
//!
//! [nodes.relay]
//! label = "Relay"
//! kind = "relay"
//! x = 360
//! y = 220
//! width = 180
//! height = 96
//!
//! [[lanes]]
//! name = "top_bus"
//! axis = "horizontal"
//! at = 160
//!
//! [[phases]]
//! title = "Tunnel up"
//!
//! [[connectors]]
//! id = "tunnel"
//! from = { node = "relay", side = "right" }
//! to = { node = "backend", side = "left" }
//! via = [{ x = 600, y = 268 }]
//! phase = 1
//! flow = "both"
//! ```
//!
//! Node order in the file is the draw order.

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use relaymap_core::{
    geometry::{Bounds, Point, Port, Size},
    lane::{Axis, Lane},
    path::{PathDescriptor, build_polyline_path},
    route::{route_ports, segment_crosses_interior},
};

use crate::RelaymapError;

/// The drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Canvas {
    width: f32,
    height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// The role a node plays in the topology. Only affects its fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Client,
    Relay,
    Backend,
    DnsAuthority,
    CertAuthority,
}

/// A node rectangle and its label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeSpec {
    label: String,
    #[serde(default)]
    kind: NodeKind,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl NodeSpec {
    /// Creates a node with its top-left corner at `(x, y)`.
    pub fn new(
        label: impl Into<String>,
        kind: NodeKind,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            x,
            y,
            width,
            height,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the node footprint.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), self.size())
    }
}

/// One end of a connector: a node name and a side name.
///
/// The side is kept as written. Names other than `top`, `right`, `bottom`
/// and `left` attach the connector to the node center.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointSpec {
    node: String,
    side: String,
}

impl EndpointSpec {
    pub fn new(node: impl Into<String>, side: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            side: side.into(),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn side(&self) -> &str {
        &self.side
    }

    /// Resolves the side name to a port.
    pub fn port(&self) -> Port {
        Port::from_name(&self.side)
    }
}

/// Which way traffic markers travel along a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// From the `from` endpoint to the `to` endpoint.
    #[default]
    Forward,
    /// From `to` back to `from`, along the reversed path.
    Reverse,
    /// Markers in both directions.
    Both,
}

impl Flow {
    /// Returns true if markers run along the forward path.
    pub fn forward(self) -> bool {
        matches!(self, Self::Forward | Self::Both)
    }

    /// Returns true if markers run along the reversed path.
    pub fn reverse(self) -> bool {
        matches!(self, Self::Reverse | Self::Both)
    }
}

/// A routed path between two node ports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectorSpec {
    id: String,
    #[serde(default)]
    label: Option<String>,
    from: EndpointSpec,
    to: EndpointSpec,
    #[serde(default)]
    via: Vec<Point>,
    /// First phase (1-based) in which this connector is shown.
    phase: usize,
    #[serde(default)]
    flow: Flow,
}

impl ConnectorSpec {
    pub fn new(
        id: impl Into<String>,
        from: EndpointSpec,
        to: EndpointSpec,
        phase: usize,
    ) -> Self {
        Self {
            id: id.into(),
            label: None,
            from,
            to,
            via: Vec::new(),
            phase,
            flow: Flow::default(),
        }
    }

    /// Sets the label drawn at the middle of the connector.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the lane waypoints, in travel order.
    pub fn with_via(mut self, via: Vec<Point>) -> Self {
        self.via = via;
        self
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn from(&self) -> &EndpointSpec {
        &self.from
    }

    pub fn to(&self) -> &EndpointSpec {
        &self.to
    }

    pub fn via(&self) -> &[Point] {
        &self.via
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }
}

/// A step of the walkthrough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhaseSpec {
    title: String,
}

impl PhaseSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A connector together with its routed path.
#[derive(Debug, Clone)]
pub struct RoutedConnector<'a> {
    spec: &'a ConnectorSpec,
    path: PathDescriptor,
}

impl<'a> RoutedConnector<'a> {
    pub fn spec(&self) -> &'a ConnectorSpec {
        self.spec
    }

    /// The path from the `from` port to the `to` port.
    pub fn path(&self) -> &PathDescriptor {
        &self.path
    }
}

/// A place where a connector or lane runs through a node body.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutViolation {
    LaneCrossesNode {
        lane: String,
        node: String,
    },
    RouteCrossesNode {
        connector: String,
        node: String,
        segment: usize,
    },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LaneCrossesNode { lane, node } => {
                write!(f, "lane `{lane}` runs through node `{node}`")
            }
            Self::RouteCrossesNode {
                connector,
                node,
                segment,
            } => write!(
                f,
                "segment {segment} of connector `{connector}` crosses node `{node}`"
            ),
        }
    }
}

/// The full layout table of a diagram.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    canvas: Canvas,
    nodes: IndexMap<String, NodeSpec>,
    #[serde(default)]
    lanes: Vec<Lane>,
    phases: Vec<PhaseSpec>,
    #[serde(default)]
    connectors: Vec<ConnectorSpec>,
}

impl Topology {
    /// Creates an empty topology on the given canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            nodes: IndexMap::new(),
            lanes: Vec::new(),
            phases: Vec::new(),
            connectors: Vec::new(),
        }
    }

    pub fn with_node(mut self, name: impl Into<String>, node: NodeSpec) -> Self {
        self.nodes.insert(name.into(), node);
        self
    }

    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }

    pub fn with_phase(mut self, phase: PhaseSpec) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_connector(mut self, connector: ConnectorSpec) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Parses and validates a topology from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Config`] if the text is not a valid layout
    /// file, or [`RelaymapError::Layout`] if [`Topology::validate`] fails.
    pub fn from_toml_str(source: &str) -> Result<Self, RelaymapError> {
        let topology: Self = toml::from_str(source)
            .map_err(|err| RelaymapError::Config(format!("Invalid layout file: {err}")))?;
        topology.validate()?;
        debug!(
            nodes = topology.nodes.len(),
            connectors = topology.connectors.len();
            "Topology loaded"
        );
        Ok(topology)
    }

    /// The built-in walkthrough: a visitor, a DNS authority, a certificate
    /// authority, a public relay and a shielded backend.
    ///
    /// ```text
    ///            ┌─────┐         ┌────┐
    ///            │ DNS │◄────────┤ CA │
    ///            └──▲──┘         └─▲──┘
    ///   ┌───────────┘    ┌─────────┘        top bus
    /// ┌─┴───────┐    ┌───┴───┐        ┌─────────┐
    /// │ Visitor ├───►│ Relay ├◄══════►│ Backend │
    /// └─────────┘    └───▲───┘        └────┬────┘
    ///                    └─────────────────┘  bottom bus
    /// ```
    pub fn reference() -> Self {
        let top_bus = Lane::new("top_bus", Axis::Horizontal, 160.0);
        let bottom_bus = Lane::new("bottom_bus", Axis::Horizontal, 400.0);

        let backend_dial = ConnectorSpec::new(
            "backend-dial",
            EndpointSpec::new("backend", "bottom"),
            EndpointSpec::new("relay", "bottom"),
            1,
        )
        .with_label("outbound dial")
        .with_via(vec![bottom_bus.point_at(810.0), bottom_bus.point_at(450.0)]);

        let tunnel = ConnectorSpec::new(
            "tunnel",
            EndpointSpec::new("relay", "right"),
            EndpointSpec::new("backend", "left"),
            1,
        )
        .with_label("tunnel")
        .with_flow(Flow::Both);

        let acme_order = ConnectorSpec::new(
            "acme-order",
            EndpointSpec::new("relay", "top"),
            EndpointSpec::new("ca", "bottom"),
            2,
        )
        .with_label("ACME order")
        .with_via(vec![top_bus.point_at(450.0), top_bus.point_at(640.0)])
        .with_flow(Flow::Both);

        let dns_challenge = ConnectorSpec::new(
            "dns-challenge",
            EndpointSpec::new("ca", "left"),
            EndpointSpec::new("dns", "right"),
            2,
        )
        .with_label("DNS-01 check");

        let resolve = ConnectorSpec::new(
            "resolve",
            EndpointSpec::new("visitor", "top"),
            EndpointSpec::new("dns", "bottom"),
            3,
        )
        .with_label("resolve")
        .with_via(vec![top_bus.point_at(120.0), top_bus.point_at(320.0)])
        .with_flow(Flow::Both);

        let request = ConnectorSpec::new(
            "request",
            EndpointSpec::new("visitor", "right"),
            EndpointSpec::new("relay", "left"),
            4,
        )
        .with_label("HTTPS")
        .with_flow(Flow::Both);

        Self::new(Canvas::new(960.0, 460.0))
            .with_node(
                "visitor",
                NodeSpec::new("Visitor", NodeKind::Client, 40.0, 220.0, 160.0, 96.0),
            )
            .with_node(
                "dns",
                NodeSpec::new(
                    "DNS authority",
                    NodeKind::DnsAuthority,
                    240.0,
                    40.0,
                    160.0,
                    80.0,
                ),
            )
            .with_node(
                "ca",
                NodeSpec::new(
                    "Certificate authority",
                    NodeKind::CertAuthority,
                    560.0,
                    40.0,
                    160.0,
                    80.0,
                ),
            )
            .with_node(
                "relay",
                NodeSpec::new("Relay", NodeKind::Relay, 360.0, 220.0, 180.0, 96.0),
            )
            .with_node(
                "backend",
                NodeSpec::new("Backend", NodeKind::Backend, 720.0, 220.0, 180.0, 96.0),
            )
            .with_lane(top_bus)
            .with_lane(bottom_bus)
            .with_phase(PhaseSpec::new("Tunnel up"))
            .with_phase(PhaseSpec::new("Certificates"))
            .with_phase(PhaseSpec::new("Name resolution"))
            .with_phase(PhaseSpec::new("Request path"))
            .with_connector(backend_dial)
            .with_connector(tunnel)
            .with_connector(acme_order)
            .with_connector(dns_challenge)
            .with_connector(resolve)
            .with_connector(request)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Returns the nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeSpec)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn node(&self, name: &str) -> Option<&NodeSpec> {
        self.nodes.get(name)
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Returns the phase with the given 1-based number.
    pub fn phase(&self, number: usize) -> Option<&PhaseSpec> {
        number.checked_sub(1).and_then(|index| self.phases.get(index))
    }

    pub fn connectors(&self) -> &[ConnectorSpec] {
        &self.connectors
    }

    /// Checks the structural rules every topology must satisfy.
    ///
    /// - at least one phase
    /// - every node has a positive width and height
    /// - connector ids are unique
    /// - connector endpoints name existing nodes
    /// - connector phases are between 1 and the phase count
    ///
    /// Endpoints whose side is not recognized are allowed; each one is
    /// logged once here and attaches to its node center when routed.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Layout`] describing the first broken rule.
    pub fn validate(&self) -> Result<(), RelaymapError> {
        self.check_structure()?;

        for (connector, endpoint) in self.center_endpoints() {
            warn!(
                connector = connector.id(),
                node = endpoint.node(),
                side = endpoint.side();
                "Unrecognized side, attaching connector to node center"
            );
        }

        Ok(())
    }

    /// Endpoints whose side name does not resolve to a side port.
    pub fn center_endpoints(&self) -> impl Iterator<Item = (&ConnectorSpec, &EndpointSpec)> {
        self.connectors.iter().flat_map(|connector| {
            [connector.from(), connector.to()]
                .into_iter()
                .filter(|endpoint| endpoint.port() == Port::Center)
                .map(move |endpoint| (connector, endpoint))
        })
    }

    /// [`Topology::validate`] without the per-endpoint warnings.
    pub(crate) fn check_structure(&self) -> Result<(), RelaymapError> {
        if self.phases.is_empty() {
            return Err(RelaymapError::Layout(
                "topology must declare at least one phase".to_string(),
            ));
        }

        for (name, node) in &self.nodes {
            if !node.size().is_positive() {
                return Err(RelaymapError::Layout(format!(
                    "node `{name}` must have a positive width and height"
                )));
            }
        }

        let mut seen = HashSet::new();
        for connector in &self.connectors {
            if !seen.insert(connector.id()) {
                return Err(RelaymapError::Layout(format!(
                    "duplicate connector id `{}`",
                    connector.id()
                )));
            }

            for endpoint in [connector.from(), connector.to()] {
                if !self.nodes.contains_key(endpoint.node()) {
                    return Err(RelaymapError::Layout(format!(
                        "connector `{}` references unknown node `{}`",
                        connector.id(),
                        endpoint.node()
                    )));
                }
            }

            if connector.phase() == 0 || connector.phase() > self.phases.len() {
                return Err(RelaymapError::Layout(format!(
                    "connector `{}` has phase {} but the topology has {} phases",
                    connector.id(),
                    connector.phase(),
                    self.phases.len()
                )));
            }
        }

        Ok(())
    }

    fn endpoint_bounds(
        &self,
        connector: &ConnectorSpec,
        endpoint: &EndpointSpec,
    ) -> Result<Bounds, RelaymapError> {
        self.nodes
            .get(endpoint.node())
            .map(NodeSpec::bounds)
            .ok_or_else(|| {
                RelaymapError::Layout(format!(
                    "connector `{}` references unknown node `{}`",
                    connector.id(),
                    endpoint.node()
                ))
            })
    }

    /// Routes one connector with the given standoff distance.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Layout`] if an endpoint names an unknown node.
    pub fn route<'a>(
        &self,
        connector: &'a ConnectorSpec,
        standoff: f32,
    ) -> Result<RoutedConnector<'a>, RelaymapError> {
        let start_rect = self.endpoint_bounds(connector, connector.from())?;
        let end_rect = self.endpoint_bounds(connector, connector.to())?;

        let points = route_ports(
            start_rect,
            connector.from().port(),
            end_rect,
            connector.to().port(),
            connector.via(),
            standoff,
        );

        Ok(RoutedConnector {
            spec: connector,
            path: build_polyline_path(&points),
        })
    }

    /// Routes every connector, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Layout`] if any endpoint names an unknown node.
    pub fn routes(&self, standoff: f32) -> Result<Vec<RoutedConnector<'_>>, RelaymapError> {
        self.connectors
            .iter()
            .map(|connector| self.route(connector, standoff))
            .collect()
    }

    /// Finds lanes and routed segments that pass through a node body.
    ///
    /// A connector attached to a node center necessarily starts inside that
    /// node; its first two segments (or last two, for the end node) are not
    /// reported against it.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Layout`] if a connector cannot be routed.
    pub fn check_lanes(&self, standoff: f32) -> Result<Vec<LayoutViolation>, RelaymapError> {
        let mut violations = Vec::new();

        for lane in &self.lanes {
            for (name, node) in &self.nodes {
                if lane.intersects(node.bounds()) {
                    violations.push(LayoutViolation::LaneCrossesNode {
                        lane: lane.name().to_string(),
                        node: name.clone(),
                    });
                }
            }
        }

        for routed in self.routes(standoff)? {
            let spec = routed.spec();
            let points = routed.path().points();
            let segment_count = points.len().saturating_sub(1);

            for (segment, pair) in points.windows(2).enumerate() {
                for (name, node) in &self.nodes {
                    let exempt_start = spec.from().node() == name
                        && spec.from().port() == Port::Center
                        && segment < 2;
                    let exempt_end = spec.to().node() == name
                        && spec.to().port() == Port::Center
                        && segment + 2 >= segment_count;
                    if exempt_start || exempt_end {
                        continue;
                    }

                    if segment_crosses_interior(pair[0], pair[1], node.bounds()) {
                        violations.push(LayoutViolation::RouteCrossesNode {
                            connector: spec.id().to_string(),
                            node: name.clone(),
                            segment,
                        });
                    }
                }
            }
        }

        Ok(violations)
    }
}
