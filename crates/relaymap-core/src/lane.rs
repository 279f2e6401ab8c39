//! Shared bus lanes.
//!
//! A lane is a fixed row (`y`) or column (`x`) of free canvas that several
//! connectors route through. Lanes are chosen once for a given node layout so
//! that they never cut through a node body; connectors then pick their
//! waypoints on those lanes.
//!
//! Nothing in the router enforces this. [`Lane::intersects`] lets a layout be
//! checked when it changes.

use std::fmt;

use serde::Deserialize;

use crate::geometry::{Bounds, Point};

/// Tolerance used when testing whether a waypoint sits on a lane.
const ON_LANE_TOLERANCE: f32 = 1e-3;

/// The orientation of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// A row: every point on it has the same `y`.
    Horizontal,
    /// A column: every point on it has the same `x`.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// A named bus lane at a fixed coordinate.
///
/// # Examples
///
/// ```
/// # use relaymap_core::geometry::{Bounds, Point, Size};
/// # use relaymap_core::lane::{Axis, Lane};
/// let top_bus = Lane::new("top_bus", Axis::Horizontal, 160.0);
/// let relay = Bounds::new_from_top_left(Point::new(360.0, 220.0), Size::new(180.0, 96.0));
///
/// assert!(!top_bus.intersects(relay));
/// assert!(top_bus.contains(Point::new(450.0, 160.0)));
/// assert_eq!(top_bus.point_at(640.0), Point::new(640.0, 160.0));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lane {
    name: String,
    axis: Axis,
    at: f32,
}

impl Lane {
    /// Creates a lane at coordinate `at` along `axis`
    pub fn new(name: impl Into<String>, axis: Axis, at: f32) -> Self {
        Self {
            name: name.into(),
            axis,
            at,
        }
    }

    /// Returns the lane name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lane orientation
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the fixed coordinate of the lane
    pub fn at(&self) -> f32 {
        self.at
    }

    /// Returns the point on this lane at the given free coordinate.
    ///
    /// For a horizontal lane `along` is the x-coordinate; for a vertical lane
    /// it is the y-coordinate.
    pub fn point_at(&self, along: f32) -> Point {
        match self.axis {
            Axis::Horizontal => Point::new(along, self.at),
            Axis::Vertical => Point::new(self.at, along),
        }
    }

    /// Returns true if `point` lies on this lane.
    pub fn contains(&self, point: Point) -> bool {
        let coordinate = match self.axis {
            Axis::Horizontal => point.y(),
            Axis::Vertical => point.x(),
        };
        (coordinate - self.at).abs() <= ON_LANE_TOLERANCE
    }

    /// Returns true if the lane passes through the interior of `rect`.
    ///
    /// A lane running exactly along a node edge does not intersect it.
    pub fn intersects(&self, rect: Bounds) -> bool {
        match self.axis {
            Axis::Horizontal => self.at > rect.min_y() && self.at < rect.max_y(),
            Axis::Vertical => self.at > rect.min_x() && self.at < rect.max_x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn node() -> Bounds {
        Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(200.0, 80.0))
    }

    #[test]
    fn test_horizontal_lane_intersection() {
        assert!(Lane::new("mid", Axis::Horizontal, 140.0).intersects(node()));
        assert!(!Lane::new("above", Axis::Horizontal, 60.0).intersects(node()));
        assert!(!Lane::new("below", Axis::Horizontal, 200.0).intersects(node()));
    }

    #[test]
    fn test_vertical_lane_intersection() {
        assert!(Lane::new("through", Axis::Vertical, 150.0).intersects(node()));
        assert!(!Lane::new("beside", Axis::Vertical, 320.0).intersects(node()));
    }

    #[test]
    fn test_lane_on_edge_does_not_intersect() {
        assert!(!Lane::new("edge", Axis::Horizontal, 100.0).intersects(node()));
        assert!(!Lane::new("edge", Axis::Vertical, 300.0).intersects(node()));
    }

    #[test]
    fn test_point_at_and_contains() {
        let column = Lane::new("col", Axis::Vertical, 40.0);
        let point = column.point_at(75.0);
        assert_eq!(point, Point::new(40.0, 75.0));
        assert!(column.contains(point));
        assert!(!column.contains(Point::new(41.0, 75.0)));
    }

    #[test]
    fn test_accessors() {
        let lane = Lane::new("bottom_bus", Axis::Horizontal, 400.0);
        assert_eq!(lane.name(), "bottom_bus");
        assert_eq!(lane.axis(), Axis::Horizontal);
        assert_eq!(lane.at(), 400.0);
        assert_eq!(lane.axis().to_string(), "horizontal");
    }
}
