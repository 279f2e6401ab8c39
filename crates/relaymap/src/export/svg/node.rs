//! Node rectangles and their labels.

use svg::node::element as svg_element;

use relaymap_core::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
};

use crate::topology::NodeSpec;

/// Corner radius of node rectangles.
const CORNER_RADIUS: f32 = 8.0;

/// A positioned node ready to draw.
#[derive(Debug)]
pub(super) struct NodeDrawable<'a> {
    name: &'a str,
    node: &'a NodeSpec,
    fill: Color,
    stroke: &'a StrokeDefinition,
    text: Color,
}

impl<'a> NodeDrawable<'a> {
    pub(super) fn new(
        name: &'a str,
        node: &'a NodeSpec,
        fill: Color,
        stroke: &'a StrokeDefinition,
        text: Color,
    ) -> Self {
        Self {
            name,
            node,
            fill,
            stroke,
            text,
        }
    }
}

impl Drawable for NodeDrawable<'_> {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = self.node.bounds();
        let center = bounds.center();

        let rect = svg_element::Rectangle::new()
            .set("data-node", self.name)
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", self.fill.to_string())
            .set("fill-opacity", self.fill.alpha());
        let rect = apply_stroke!(rect, self.stroke);
        output.add_to_layer(RenderLayer::Node, Box::new(rect));

        let label = svg_element::Text::new(self.node.label())
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", 14)
            .set("fill", self.text.to_string());
        output.add_to_layer(RenderLayer::Text, Box::new(label));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NodeKind;

    #[test]
    fn test_node_renders_rect_and_label() {
        let node = NodeSpec::new("Relay", NodeKind::Relay, 360.0, 220.0, 180.0, 96.0);
        let stroke = StrokeDefinition::default();
        let drawable = NodeDrawable::new(
            "relay",
            &node,
            Color::new("#bee3f8").unwrap(),
            &stroke,
            Color::default(),
        );

        let output = drawable.render_to_layers();
        assert_eq!(output.count(RenderLayer::Node), 1);
        assert_eq!(output.count(RenderLayer::Text), 1);

        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(rendered.contains("data-node=\"relay\""));
        assert!(rendered.contains("x=\"360\""));
        assert!(rendered.contains("Relay"));
        assert!(rendered.contains("x=\"450\""));
    }
}
