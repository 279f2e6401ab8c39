//! Drawing support for SVG output.
//!
//! - [`StrokeDefinition`]: line color, width and dash pattern
//! - [`RenderLayer`] and [`LayeredOutput`]: z-ordered grouping of SVG nodes
//! - [`Drawable`]: anything that can emit layered SVG nodes

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};

/// A diagram element that can render itself into render layers.
///
/// Drawables are already positioned: nodes and connectors carry absolute
/// coordinates by the time they are drawn.
pub trait Drawable: std::fmt::Debug {
    fn render_to_layers(&self) -> LayeredOutput;
}
