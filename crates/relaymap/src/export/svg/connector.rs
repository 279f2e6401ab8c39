//! Connector paths, flow markers and connector labels.

use svg::node::element as svg_element;

use relaymap_core::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    path::PathDescriptor,
};

use crate::topology::{Flow, RoutedConnector};

const MARKER_RADIUS: f32 = 4.0;
/// Shortest marker lap, in seconds. SMIL rejects a zero `dur`.
const MIN_MARKER_DURATION: f32 = 0.1;
/// Vertical gap between a connector label and the segment it sits on.
const LABEL_OFFSET: f32 = 6.0;

/// Animated dots that travel along a connector.
#[derive(Debug, Clone, Copy)]
pub(super) struct FlowMarkers {
    color: Color,
    /// Seconds for one marker to traverse the whole path.
    duration: f32,
}

impl FlowMarkers {
    /// Markers moving at `speed` units per second along a path of `length`.
    ///
    /// Very short paths still take [`MIN_MARKER_DURATION`] per lap.
    pub(super) fn new(color: Color, length: f32, speed: f32) -> Self {
        Self {
            color,
            duration: (length / speed).max(MIN_MARKER_DURATION),
        }
    }

    fn circle(&self, path: &PathDescriptor, begin: f32) -> svg_element::Circle {
        let motion = svg_element::AnimateMotion::new()
            .set("path", path.to_svg_data())
            .set("dur", format!("{:.2}s", self.duration))
            .set("begin", format!("{begin:.2}s"))
            .set("repeatCount", "indefinite");

        svg_element::Circle::new()
            .set("r", MARKER_RADIUS)
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha())
            .add(motion)
    }
}

/// A routed connector ready to draw.
#[derive(Debug)]
pub(super) struct ConnectorDrawable<'a> {
    routed: &'a RoutedConnector<'a>,
    stroke: &'a StrokeDefinition,
    markers: Option<FlowMarkers>,
    text: Color,
}

impl<'a> ConnectorDrawable<'a> {
    pub(super) fn new(
        routed: &'a RoutedConnector<'a>,
        stroke: &'a StrokeDefinition,
        text: Color,
    ) -> Self {
        Self {
            routed,
            stroke,
            markers: None,
            text,
        }
    }

    pub(super) fn with_markers(mut self, markers: FlowMarkers) -> Self {
        self.markers = Some(markers);
        self
    }

    fn render_markers(&self, markers: &FlowMarkers, output: &mut LayeredOutput) {
        let path = self.routed.path();
        let flow = self.routed.spec().flow();

        if flow.forward() {
            output.add_to_layer(RenderLayer::Flow, Box::new(markers.circle(path, 0.0)));
        }
        if flow.reverse() {
            // Return markers start half a lap behind.
            let begin = if flow == Flow::Both {
                markers.duration / 2.0
            } else {
                0.0
            };
            output.add_to_layer(
                RenderLayer::Flow,
                Box::new(markers.circle(&path.reversed(), begin)),
            );
        }
    }
}

impl Drawable for ConnectorDrawable<'_> {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let spec = self.routed.spec();
        let path = self.routed.path();

        if path.is_empty() {
            return output;
        }

        let line = svg_element::Path::new()
            .set("data-connector", spec.id())
            .set("d", path.to_svg_data())
            .set("fill", "none");
        let line = apply_stroke!(line, self.stroke);
        output.add_to_layer(RenderLayer::Connector, Box::new(line));

        // A path of zero length has nowhere for a marker to travel.
        if let Some(markers) = self.markers.filter(|_| path.length() > 0.0) {
            self.render_markers(&markers, &mut output);
        }

        if let (Some(label), Some(anchor)) = (spec.label(), path.label_anchor()) {
            let text = svg_element::Text::new(label)
                .set("x", anchor.x())
                .set("y", anchor.y() - LABEL_OFFSET)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 11)
                .set("fill", self.text.to_string());
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::topology::{ConnectorSpec, EndpointSpec, Topology};

    fn render(flow: Flow, markers: bool) -> (LayeredOutput, String) {
        let topology = Topology::reference();
        let spec = ConnectorSpec::new(
            "uplink",
            EndpointSpec::new("relay", "right"),
            EndpointSpec::new("backend", "left"),
            1,
        )
        .with_label("uplink")
        .with_flow(flow);
        let routed = topology.route(&spec, 28.0).unwrap();
        let stroke = StrokeDefinition::default();

        let mut drawable = ConnectorDrawable::new(&routed, &stroke, Color::default());
        if markers {
            drawable = drawable.with_markers(FlowMarkers::new(
                Color::new("red").unwrap(),
                routed.path().length(),
                90.0,
            ));
        }

        let output = drawable.render_to_layers();
        let counts = format!(
            "{}/{}/{}",
            output.count(RenderLayer::Connector),
            output.count(RenderLayer::Flow),
            output.count(RenderLayer::Text)
        );
        (output, counts)
    }

    #[test]
    fn test_connector_without_markers() {
        let (_, counts) = render(Flow::Both, false);
        assert_eq!(counts, "1/0/1");
    }

    #[test]
    fn test_marker_count_follows_flow() {
        assert_eq!(render(Flow::Forward, true).1, "1/1/1");
        assert_eq!(render(Flow::Reverse, true).1, "1/1/1");
        assert_eq!(render(Flow::Both, true).1, "1/2/1");
    }

    #[test]
    fn test_reverse_marker_follows_reversed_path() {
        let (output, _) = render(Flow::Reverse, true);
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();

        // Relay right port is (540, 268), backend left port is (720, 268).
        assert!(rendered.contains("M 720 268 L 692 268 L 568 268 L 540 268"));
        assert!(rendered.contains("d=\"M 540 268 L 568 268 L 692 268 L 720 268\""));
        assert!(rendered.contains("dur=\"2.00s\""));
    }

    #[test]
    fn test_flow_marker_duration() {
        let markers = FlowMarkers::new(Color::default(), 300.0, 120.0);
        assert!(approx_eq!(f32, markers.duration, 2.5, ulps = 2));

        let markers = FlowMarkers::new(Color::default(), 0.3, 120.0);
        assert_eq!(markers.duration, MIN_MARKER_DURATION);
    }

    #[test]
    fn test_zero_length_connector_has_no_markers() {
        let topology = Topology::reference();
        let spec = ConnectorSpec::new(
            "loop",
            EndpointSpec::new("relay", "hub"),
            EndpointSpec::new("relay", "hub"),
            1,
        );
        let routed = topology.route(&spec, 28.0).unwrap();
        assert_eq!(routed.path().length(), 0.0);

        let stroke = StrokeDefinition::default();
        let markers = FlowMarkers::new(Color::default(), routed.path().length(), 120.0);
        let output = ConnectorDrawable::new(&routed, &stroke, Color::default())
            .with_markers(markers)
            .render_to_layers();

        assert_eq!(output.count(RenderLayer::Connector), 1);
        assert_eq!(output.count(RenderLayer::Flow), 0);
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(!rendered.contains("dur=\"0.00s\""));
    }
}
