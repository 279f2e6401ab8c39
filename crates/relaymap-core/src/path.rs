//! Polyline path descriptors.
//!
//! A [`PathDescriptor`] is the ordered list of points a connector is drawn
//! through. Order matters: it is the direction markers travel along the
//! path, and the reversed descriptor is used for traffic flowing the other
//! way.

use std::fmt::Write;

use crate::geometry::Point;

/// An ordered polyline with at least two points, or the empty path.
///
/// # Examples
///
/// ```
/// # use relaymap_core::geometry::Point;
/// # use relaymap_core::path::{build_line_path, build_polyline_path};
/// let line = build_line_path(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
/// assert_eq!(line.to_svg_data(), "M 1 2 L 3 4");
///
/// let degenerate = build_polyline_path(&[Point::new(1.0, 2.0)]);
/// assert!(degenerate.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathDescriptor {
    points: Vec<Point>,
}

impl PathDescriptor {
    /// Returns the empty path
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this path has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points visited by this path, in draw order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the first point of the path
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Returns the last point of the path
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Returns the same path traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Total length of all segments.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Returns the midpoint of the middle segment, where a label fits
    /// without sitting on a bend.
    pub fn label_anchor(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let upper = self.points.len() / 2;
        Some(self.points[upper - 1].midpoint(self.points[upper]))
    }

    /// Renders the path as SVG path data (`M x y L x y ...`).
    ///
    /// The empty path renders as an empty string.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for (index, point) in self.points.iter().enumerate() {
            let command = if index == 0 { "M" } else { " L" };
            // Writing to a String cannot fail.
            let _ = write!(data, "{command} {} {}", point.x(), point.y());
        }
        data
    }
}

/// Builds the straight two-point path from `from` to `to`.
pub fn build_line_path(from: Point, to: Point) -> PathDescriptor {
    PathDescriptor {
        points: vec![from, to],
    }
}

/// Builds a path visiting every point in order.
///
/// Fewer than two points cannot be drawn and yield the empty path.
pub fn build_polyline_path(points: &[Point]) -> PathDescriptor {
    if points.len() < 2 {
        return PathDescriptor::empty();
    }
    PathDescriptor {
        points: points.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 50.0),
        ]
    }

    #[test]
    fn test_build_line_path() {
        let path = build_line_path(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(path.points(), &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(path.to_svg_data(), "M 1 2 L 3 4");
    }

    #[test]
    fn test_build_polyline_path_short_inputs_are_empty() {
        assert!(build_polyline_path(&[]).is_empty());
        assert!(build_polyline_path(&[Point::new(5.0, 5.0)]).is_empty());
        assert_eq!(build_polyline_path(&[]).to_svg_data(), "");
    }

    #[test]
    fn test_build_polyline_path_preserves_order() {
        let points = zigzag();
        let path = build_polyline_path(&points);
        assert_eq!(path.points(), points.as_slice());
        assert_eq!(path.to_svg_data(), "M 0 0 L 0 10 L 30 10 L 30 50");
    }

    #[test]
    fn test_duplicate_points_are_kept() {
        let p = Point::new(2.0, 2.0);
        let path = build_polyline_path(&[p, p]);
        assert!(!path.is_empty());
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn test_reversed_visits_points_backwards() {
        let points = zigzag();
        let reversed = build_polyline_path(&points).reversed();

        let mut expected = points.clone();
        expected.reverse();
        assert_eq!(reversed.points(), expected.as_slice());
        assert_eq!(reversed, build_polyline_path(&expected));
        assert_eq!(reversed.start(), points.last().copied());
        assert_eq!(reversed.end(), points.first().copied());
    }

    #[test]
    fn test_length() {
        let path = build_polyline_path(&zigzag());
        assert_approx_eq!(f32, path.length(), 80.0);
        assert_approx_eq!(f32, path.reversed().length(), 80.0);
        assert_eq!(PathDescriptor::empty().length(), 0.0);
    }

    #[test]
    fn test_label_anchor() {
        let path = build_polyline_path(&zigzag());
        assert_eq!(path.label_anchor(), Some(Point::new(15.0, 10.0)));

        let line = build_line_path(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(line.label_anchor(), Some(Point::new(5.0, 10.0)));

        assert_eq!(PathDescriptor::empty().label_anchor(), None);
    }
}
