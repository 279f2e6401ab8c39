//! Relaymap Core Types and Definitions
//!
//! This crate provides the pure layout engine behind Relaymap diagrams. It
//! includes:
//!
//! - **Geometry**: Points, bounds, sides and ports ([`geometry`] module)
//! - **Paths**: Polyline path descriptors ([`path`] module)
//! - **Routing**: Port-to-port connector routing with standoffs ([`route`] module)
//! - **Lanes**: Shared bus lanes connectors are routed through ([`lane`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Strokes and render layers for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod lane;
pub mod path;
pub mod route;
