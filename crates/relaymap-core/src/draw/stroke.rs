//! Line styling for node borders, connectors and lane guides.
//!
//! A [`StrokeDefinition`] maps onto the SVG `stroke`, `stroke-opacity`,
//! `stroke-width`, `stroke-linecap` and `stroke-dasharray` attributes; the
//! [`apply_stroke!`](crate::apply_stroke) macro sets them on any element.

use crate::color::Color;

/// Solid or dashed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 6 on, 4 off. Lane guides use this.
    Dashed,
}

impl StrokeStyle {
    /// The `stroke-dasharray` value; `None` draws a continuous line.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }
}

/// Shape of line ends. Round caps make flow paths look continuous at bends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

impl StrokeCap {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Color, width, dash style and cap of a line.
///
/// ```
/// use relaymap_core::{color::Color, draw::{StrokeCap, StrokeDefinition}};
///
/// let active = StrokeDefinition::solid(Color::new("#d53f8c").unwrap(), 2.5)
///     .with_cap(StrokeCap::Round);
/// assert_eq!(active.cap(), StrokeCap::Round);
/// assert_eq!(active.style().dasharray(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Butt,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::solid(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }
}

impl Default for StrokeDefinition {
    /// One unit wide, solid black.
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets every stroke attribute of a [`StrokeDefinition`] on an SVG element.
///
/// ```
/// use relaymap_core::{apply_stroke, color::Color, draw::StrokeDefinition};
/// use svg::node::element::Line;
///
/// let guide = StrokeDefinition::dashed(Color::new("gray").unwrap(), 1.0);
/// let line = apply_stroke!(Line::new(), &guide);
/// assert!(line.to_string().contains("stroke-dasharray=\"6,4\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().as_svg());

        match stroke.style().dasharray() {
            Some(pattern) => element.set("stroke-dasharray", pattern),
            None => element,
        }
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::Path;

    use super::*;

    #[test]
    fn test_default_is_thin_black() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
    }

    #[test]
    fn test_dashed_keeps_color_and_width() {
        let color = Color::new("teal").unwrap();
        let stroke = StrokeDefinition::dashed(color, 1.5);

        assert_eq!(stroke.color(), color);
        assert_eq!(stroke.width(), 1.5);
        assert_eq!(stroke.style().dasharray(), Some("6,4"));
    }

    #[test]
    fn test_apply_stroke_attributes() {
        let stroke = StrokeDefinition::solid(Color::new("blue").unwrap(), 2.0)
            .with_cap(StrokeCap::Round);
        let rendered = crate::apply_stroke!(Path::new(), &stroke).to_string();

        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(rendered.contains("stroke-linecap=\"round\""));
        assert!(rendered.contains("stroke-opacity=\"1\""));
        assert!(!rendered.contains("stroke-dasharray"));
    }
}
