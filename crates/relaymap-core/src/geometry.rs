//! Geometric primitives for diagram layout and connector routing.
//!
//! This module provides the value types every layout computation in Relaymap
//! is built from, together with the free functions that locate ports on a
//! node rectangle.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned node rectangle
//! - [`Edges`] - The four boundary coordinates of a rectangle
//! - [`Side`] - One of the four edges of a rectangle
//! - [`Port`] - An attachment point on a rectangle: an edge midpoint or the center
//!
//! # Coordinate System
//!
//! Relaymap uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Moving "outward" through the top edge therefore decreases `y`.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use relaymap_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Linear interpolation at `t = 0.5` between this point and another.
    ///
    /// Written as `a + (b - a) * 0.5` so that it agrees with the free
    /// [`midpoint`] function bit for bit.
    pub fn midpoint(self, other: Point) -> Self {
        self.add_point(other.sub_point(self).scale(0.5))
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both dimensions are strictly positive
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle describing a node's footprint.
///
/// Nodes are declared by their top-left corner and size
/// ([`Bounds::new_from_top_left`]). Both dimensions must be positive; the
/// port functions in this module give meaningless results otherwise, so
/// callers validate node sizes before laying anything out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the four boundary coordinates
    pub fn edges(self) -> Edges {
        Edges {
            left: self.min_x,
            right: self.max_x,
            top: self.min_y,
            bottom: self.max_y,
        }
    }

    /// Returns true if `point` lies strictly inside the rectangle.
    ///
    /// Points on the boundary are outside: ports sit on the boundary and
    /// connectors are allowed to touch it.
    pub fn contains_interior(self, point: Point) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }
}

/// The four boundary coordinates of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// One of the four edges of a node rectangle.
///
/// Each side carries exactly one port, located at the midpoint of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides, clockwise from the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Returns the lowercase name of this side
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err(format!(
                "invalid side `{s}`, valid values: top, right, bottom, left"
            )),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attachment point on a node rectangle.
///
/// `Center` is the fallback used when a side name cannot be recognized: the
/// connector attaches to the middle of the node and leaves it without a
/// standoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Side(Side),
    Center,
}

impl Port {
    /// Resolves a side name, falling back to [`Port::Center`] for anything
    /// that is not one of `top`, `right`, `bottom` or `left`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relaymap_core::geometry::{Port, Side};
    /// assert_eq!(Port::from_name("left"), Port::Side(Side::Left));
    /// assert_eq!(Port::from_name("northwest"), Port::Center);
    /// ```
    pub fn from_name(name: &str) -> Self {
        name.parse::<Side>().map_or(Self::Center, Self::Side)
    }

    /// Returns the location of this port on `rect`.
    pub fn anchor(self, rect: Bounds) -> Point {
        match self {
            Self::Side(side) => anchor_point(rect, side),
            Self::Center => rect_center(rect),
        }
    }

    /// Offsets `point` outward through this port. Identity for `Center`.
    pub fn standoff(self, point: Point, distance: f32) -> Point {
        match self {
            Self::Side(side) => standoff(point, side, distance),
            Self::Center => point,
        }
    }
}

impl From<Side> for Port {
    fn from(side: Side) -> Self {
        Self::Side(side)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Side(side) => side.fmt(f),
            Self::Center => f.write_str("center"),
        }
    }
}

/// Returns the center of `rect`: `(x + w/2, y + h/2)`.
pub fn rect_center(rect: Bounds) -> Point {
    rect.center()
}

/// Returns the left, right, top and bottom coordinates of `rect`.
pub fn rect_edges(rect: Bounds) -> Edges {
    rect.edges()
}

/// Returns the port of `rect` on `side`: the midpoint of that edge.
///
/// # Examples
///
/// ```
/// # use relaymap_core::geometry::{anchor_point, Bounds, Point, Side, Size};
/// let rect = Bounds::new_from_top_left(Point::new(100.0, 50.0), Size::new(200.0, 100.0));
/// assert_eq!(anchor_point(rect, Side::Top), Point::new(200.0, 50.0));
/// assert_eq!(anchor_point(rect, Side::Left), Point::new(100.0, 100.0));
/// ```
pub fn anchor_point(rect: Bounds, side: Side) -> Point {
    let center = rect.center();
    let edges = rect.edges();
    match side {
        Side::Top => Point::new(center.x, edges.top),
        Side::Bottom => Point::new(center.x, edges.bottom),
        Side::Left => Point::new(edges.left, center.y),
        Side::Right => Point::new(edges.right, center.y),
    }
}

/// Offsets `point` by `distance` away from a node, in the direction `side`
/// faces.
///
/// `distance` must be non-negative; zero returns `point` unchanged.
pub fn standoff(point: Point, side: Side, distance: f32) -> Point {
    debug_assert!(distance >= 0.0, "standoff distance must be non-negative");
    match side {
        Side::Top => point.with_y(point.y - distance),
        Side::Bottom => point.with_y(point.y + distance),
        Side::Left => point.with_x(point.x - distance),
        Side::Right => point.with_x(point.x + distance),
    }
}

/// Returns the point halfway between `a` and `b`.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new(a.x + (b.x - a.x) * 0.5, a.y + (b.y - a.y) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rect() -> Bounds {
        Bounds::new_from_top_left(Point::new(100.0, 50.0), Size::new(200.0, 100.0))
    }

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn test_midpoint_concrete() {
        let mid = midpoint(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(mid, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_midpoint_matches_method() {
        let a = Point::new(-3.0, 7.5);
        let b = Point::new(12.0, -1.0);
        assert_eq!(midpoint(a, b), a.midpoint(b));
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(rect_center(sample_rect()), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_rect_edges() {
        let edges = rect_edges(sample_rect());
        assert_eq!(edges.left, 100.0);
        assert_eq!(edges.right, 300.0);
        assert_eq!(edges.top, 50.0);
        assert_eq!(edges.bottom, 150.0);
    }

    #[test]
    fn test_anchor_points_on_every_side() {
        let rect = sample_rect();
        assert_eq!(anchor_point(rect, Side::Top), Point::new(200.0, 50.0));
        assert_eq!(anchor_point(rect, Side::Right), Point::new(300.0, 100.0));
        assert_eq!(anchor_point(rect, Side::Bottom), Point::new(200.0, 150.0));
        assert_eq!(anchor_point(rect, Side::Left), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_port_center_fallback() {
        let rect = sample_rect();
        assert_eq!(Port::from_name("diagonal"), Port::Center);
        assert_eq!(Port::from_name("Top"), Port::Center);
        assert_eq!(Port::from_name("").anchor(rect), rect_center(rect));
    }

    #[test]
    fn test_port_side_matches_anchor_point() {
        let rect = sample_rect();
        for side in Side::ALL {
            assert_eq!(Port::from(side).anchor(rect), anchor_point(rect, side));
            assert_eq!(Port::from_name(side.name()), Port::Side(side));
        }
    }

    #[test]
    fn test_standoff_directions() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(standoff(p, Side::Top, 4.0), Point::new(10.0, 6.0));
        assert_eq!(standoff(p, Side::Bottom, 4.0), Point::new(10.0, 14.0));
        assert_eq!(standoff(p, Side::Left, 4.0), Point::new(6.0, 10.0));
        assert_eq!(standoff(p, Side::Right, 4.0), Point::new(14.0, 10.0));
    }

    #[test]
    fn test_standoff_zero_is_identity() {
        let p = Point::new(-2.0, 9.0);
        for side in Side::ALL {
            assert_eq!(standoff(p, side, 0.0), p);
        }
        assert_eq!(Port::Center.standoff(p, 28.0), p);
    }

    #[test]
    fn test_standoff_moves_away_from_node() {
        let rect = sample_rect();
        for side in Side::ALL {
            let port = anchor_point(rect, side);
            let out = standoff(port, side, 10.0);
            assert!(!rect.contains_interior(out));
            assert!(out.distance(rect.center()) > port.distance(rect.center()));
        }
    }

    #[test]
    fn test_side_parse() {
        for side in Side::ALL {
            assert_eq!(side.name().parse::<Side>(), Ok(side));
        }
        assert!("up".parse::<Side>().is_err());
    }

    #[test]
    fn test_contains_interior_excludes_boundary() {
        let rect = sample_rect();
        assert!(rect.contains_interior(Point::new(200.0, 100.0)));
        assert!(!rect.contains_interior(Point::new(100.0, 100.0)));
        assert!(!rect.contains_interior(Point::new(200.0, 150.0)));
        assert!(!rect.contains_interior(Point::new(50.0, 100.0)));
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(4.0, -1.0).is_positive());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| {
                Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
            })
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![
            Just(Side::Top),
            Just(Side::Right),
            Just(Side::Bottom),
            Just(Side::Left),
        ]
    }

    fn distance_strategy() -> impl Strategy<Value = f32> {
        0.0f32..200.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Top and bottom ports share the center x; left and right ports share the center y.
    fn check_ports_align_with_center(rect: Bounds) -> Result<(), TestCaseError> {
        let center = rect_center(rect);

        prop_assert_eq!(anchor_point(rect, Side::Top).x(), center.x());
        prop_assert_eq!(anchor_point(rect, Side::Bottom).x(), center.x());
        prop_assert_eq!(anchor_point(rect, Side::Left).y(), center.y());
        prop_assert_eq!(anchor_point(rect, Side::Right).y(), center.y());
        Ok(())
    }

    /// Every port lies exactly on the rectangle boundary.
    fn check_ports_on_boundary(rect: Bounds) -> Result<(), TestCaseError> {
        let edges = rect_edges(rect);

        prop_assert_eq!(anchor_point(rect, Side::Top).y(), edges.top);
        prop_assert_eq!(anchor_point(rect, Side::Bottom).y(), edges.bottom);
        prop_assert_eq!(anchor_point(rect, Side::Left).x(), edges.left);
        prop_assert_eq!(anchor_point(rect, Side::Right).x(), edges.right);
        Ok(())
    }

    /// Two standoffs through the same side compose additively.
    fn check_standoff_is_additive(
        p: Point,
        side: Side,
        d1: f32,
        d2: f32,
    ) -> Result<(), TestCaseError> {
        let twice = standoff(standoff(p, side, d1), side, d2);
        let once = standoff(p, side, d1 + d2);

        prop_assert!(approx_eq!(f32, twice.x(), once.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, twice.y(), once.y(), epsilon = 0.001));
        Ok(())
    }

    /// A zero standoff is the identity.
    fn check_standoff_zero_identity(p: Point, side: Side) -> Result<(), TestCaseError> {
        prop_assert_eq!(standoff(p, side, 0.0), p);
        Ok(())
    }

    /// Midpoint is symmetric in its arguments.
    fn check_midpoint_is_symmetric(a: Point, b: Point) -> Result<(), TestCaseError> {
        let ab = midpoint(a, b);
        let ba = midpoint(b, a);

        prop_assert!(approx_eq!(f32, ab.x(), ba.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, ab.y(), ba.y(), epsilon = 0.001));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn ports_align_with_center(rect in bounds_strategy()) {
            check_ports_align_with_center(rect)?;
        }

        #[test]
        fn ports_on_boundary(rect in bounds_strategy()) {
            check_ports_on_boundary(rect)?;
        }

        #[test]
        fn standoff_is_additive(
            p in point_strategy(),
            side in side_strategy(),
            d1 in distance_strategy(),
            d2 in distance_strategy(),
        ) {
            check_standoff_is_additive(p, side, d1, d2)?;
        }

        #[test]
        fn standoff_zero_identity(p in point_strategy(), side in side_strategy()) {
            check_standoff_zero_identity(p, side)?;
        }

        #[test]
        fn midpoint_is_symmetric(a in point_strategy(), b in point_strategy()) {
            check_midpoint_is_symmetric(a, b)?;
        }
    }
}
