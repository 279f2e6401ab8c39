//! Port-to-port connector routing.
//!
//! Routing here is declarative: ports are fixed edge midpoints and the caller
//! supplies the intermediate waypoints, normally points on the shared bus
//! lanes from [`crate::lane`]. The router only adds a perpendicular standoff
//! at each end so that a connector leaves and enters its node square to the
//! boundary before bending.
//!
//! ```text
//!   ┌───────┐                         ┌───────┐
//!   │   A   ●──○ · · · via · · · ○──●   B   │
//!   └───────┘                         └───────┘
//!        start  start_out      end_out  end
//! ```
//!
//! No obstacle avoidance happens at runtime. Keeping connectors clear of node
//! bodies is a property of the chosen waypoints; [`segment_crosses_interior`]
//! exists so layouts can be checked, not so routes can be repaired.

use crate::geometry::{Bounds, Point, Port, Side};

/// Length of the perpendicular run at each end of a routed connector.
pub const STANDOFF_DISTANCE: f32 = 28.0;

/// Routes a connector between two side ports through `via`.
///
/// The result is, in order: the start port, the start port pushed outward by
/// [`STANDOFF_DISTANCE`], every waypoint in `via`, the end port pushed
/// outward, and the end port. With no waypoints that is exactly four points.
///
/// # Examples
///
/// ```
/// # use relaymap_core::geometry::{Bounds, Point, Side, Size};
/// # use relaymap_core::route::route_connector;
/// let relay = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let backend = Bounds::new_from_top_left(Point::new(200.0, 0.0), Size::new(100.0, 50.0));
///
/// let points = route_connector(relay, Side::Right, backend, Side::Left, &[]);
/// assert_eq!(
///     points,
///     vec![
///         Point::new(100.0, 25.0),
///         Point::new(128.0, 25.0),
///         Point::new(172.0, 25.0),
///         Point::new(200.0, 25.0),
///     ]
/// );
/// ```
pub fn route_connector(
    start_rect: Bounds,
    start_side: Side,
    end_rect: Bounds,
    end_side: Side,
    via: &[Point],
) -> Vec<Point> {
    route_ports(
        start_rect,
        start_side.into(),
        end_rect,
        end_side.into(),
        via,
        STANDOFF_DISTANCE,
    )
}

/// Routes a connector between two ports with an explicit standoff distance.
///
/// A [`Port::Center`] end has no standoff, so its port point appears twice in
/// a row. Consecutive duplicates are harmless to the path builders.
pub fn route_ports(
    start_rect: Bounds,
    start_port: Port,
    end_rect: Bounds,
    end_port: Port,
    via: &[Point],
    distance: f32,
) -> Vec<Point> {
    let start = start_port.anchor(start_rect);
    let end = end_port.anchor(end_rect);
    let start_out = start_port.standoff(start, distance);
    let end_out = end_port.standoff(end, distance);

    let mut points = Vec::with_capacity(via.len() + 4);
    points.push(start);
    points.push(start_out);
    points.extend_from_slice(via);
    points.push(end_out);
    points.push(end);
    points
}

/// Returns true if the segment `a → b` passes through the interior of `rect`.
///
/// Touching the boundary, running along an edge, or passing exactly through
/// a corner does not count. Uses Liang–Barsky clipping against the closed
/// rectangle, then tests whether the clipped span lies inside the open one.
pub fn segment_crosses_interior(a: Point, b: Point, rect: Bounds) -> bool {
    let delta = b.sub_point(a);
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    let clip_planes = [
        (-delta.x(), a.x() - rect.min_x()),
        (delta.x(), rect.max_x() - a.x()),
        (-delta.y(), a.y() - rect.min_y()),
        (delta.y(), rect.max_y() - a.y()),
    ];

    for (p, q) in clip_planes {
        if p == 0.0 {
            // Parallel to this edge: either fully outside or unconstrained.
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    let inside = a.add_point(delta.scale((t_enter + t_exit) / 2.0));
    rect.contains_interior(inside)
}
