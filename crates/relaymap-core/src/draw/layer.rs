//! Layer-based z-ordering for SVG output.
//!
//! Drawables add their SVG nodes to a [`RenderLayer`]; [`LayeredOutput::render`]
//! then emits one `<g data-layer="...">` per non-empty layer, bottom to top.
//! This keeps flow markers above connectors and labels above everything,
//! regardless of the order elements were drawn in.
//!
//! # Example
//!
//! ```
//! # use relaymap_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Relay")));
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//!
//! // Node renders before Text
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Bus lane guides
    Lane,
    /// Connector paths
    Connector,
    /// Node rectangles
    Node,
    /// Animated flow markers
    Flow,
    /// Node and connector labels
    Text,
}

impl RenderLayer {
    /// Returns the value used for the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Lane => "lane",
            Self::Connector => "connector",
            Self::Node => "node",
            Self::Flow => "flow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`. Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes on `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Consumes the output and returns one `<g data-layer>` per non-empty
    /// layer, bottom layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable: insertion order survives within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<(RenderLayer, Vec<SvgNode>)> = Vec::new();
        for (layer, node) in self.items {
            match groups.last_mut() {
                Some((current, nodes)) if *current == layer => nodes.push(node),
                _ => groups.push((layer, vec![node])),
            }
        }

        groups
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_count() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Flow, Box::new(Rectangle::new()));

        assert_eq!(output.count(RenderLayer::Node), 2);
        assert_eq!(output.count(RenderLayer::Flow), 1);
        assert_eq!(output.count(RenderLayer::Lane), 0);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Connector, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Connector, Box::new(Rectangle::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }

    #[test]
    fn test_render_orders_layers_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Flow, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("data-layer=\"background\""));
        assert!(rendered[1].contains("data-layer=\"flow\""));
        assert!(rendered[2].contains("data-layer=\"text\""));
    }
}
