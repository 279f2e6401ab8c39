//! Configuration types for Relaymap rendering.
//!
//! All types implement [`serde::Deserialize`] and are normally loaded from a
//! TOML file by the CLI. Every field is optional; missing fields fall back to
//! the defaults documented on each accessor.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Routing and layout-checking options.
//! - [`StyleConfig`] - Visual options such as background color and flow speed.
//!
//! # Example
//!
//! ```
//! # use relaymap::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     strict_lanes = true
//!
//!     [style]
//!     background_color = "white"
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.layout().strict_lanes());
//! assert_eq!(config.layout().standoff_distance(), 28.0);
//! assert!(config.style().background_color().unwrap().is_some());
//! ```

use serde::Deserialize;

use relaymap_core::{color::Color, route::STANDOFF_DISTANCE};

use crate::RelaymapError;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks the numeric settings that routing and animation depend on.
    ///
    /// # Errors
    ///
    /// Returns [`RelaymapError::Config`] if the standoff distance is negative
    /// or not finite, or if the flow speed is not a positive finite number.
    pub fn validate(&self) -> Result<(), RelaymapError> {
        let standoff = self.layout.standoff_distance;
        if !standoff.is_finite() || standoff < 0.0 {
            return Err(RelaymapError::Config(format!(
                "layout.standoff_distance must be a non-negative number, got {standoff}"
            )));
        }

        let speed = self.style.flow_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(RelaymapError::Config(format!(
                "style.flow_speed must be positive, got {speed}"
            )));
        }

        Ok(())
    }
}

fn default_standoff_distance() -> f32 {
    STANDOFF_DISTANCE
}

/// Routing and layout-checking options.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Length of the perpendicular run at each connector end.
    #[serde(default = "default_standoff_distance")]
    standoff_distance: f32,

    /// Reject layouts whose lanes or routes cut through node bodies.
    #[serde(default)]
    strict_lanes: bool,

    /// Draw faint guide lines along every bus lane.
    #[serde(default)]
    show_lanes: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            standoff_distance: default_standoff_distance(),
            strict_lanes: false,
            show_lanes: false,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(standoff_distance: f32, strict_lanes: bool, show_lanes: bool) -> Self {
        Self {
            standoff_distance,
            strict_lanes,
            show_lanes,
        }
    }

    /// Returns the standoff distance. Defaults to [`STANDOFF_DISTANCE`].
    pub fn standoff_distance(&self) -> f32 {
        self.standoff_distance
    }

    /// Returns whether layout violations are errors. Defaults to `false`.
    pub fn strict_lanes(&self) -> bool {
        self.strict_lanes
    }

    /// Returns whether lane guides are drawn. Defaults to `false`.
    pub fn show_lanes(&self) -> bool {
        self.show_lanes
    }
}

fn default_flow_speed() -> f32 {
    120.0
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for the canvas, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Speed of flow markers, in diagram units per second.
    #[serde(default = "default_flow_speed")]
    flow_speed: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            flow_speed: default_flow_speed(),
        }
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(background_color: Option<String>, flow_speed: f32) -> Self {
        Self {
            background_color,
            flow_speed,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the flow marker speed. Defaults to 120 units per second.
    pub fn flow_speed(&self) -> f32 {
        self.flow_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().standoff_distance(), STANDOFF_DISTANCE);
        assert!(!config.layout().strict_lanes());
        assert!(!config.layout().show_lanes());
        assert_eq!(config.style().flow_speed(), 120.0);
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout().standoff_distance(), STANDOFF_DISTANCE);
        assert_eq!(config.style().flow_speed(), 120.0);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            standoff_distance = 12.5
            show_lanes = true

            [style]
            flow_speed = 60.0
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().standoff_distance(), 12.5);
        assert!(config.layout().show_lanes());
        assert!(!config.layout().strict_lanes());
        assert_eq!(config.style().flow_speed(), 60.0);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(AppConfig::default().validate().is_ok());

        for source in [
            "[layout]\nstandoff_distance = -5.0\n",
            "[layout]\nstandoff_distance = nan\n",
            "[style]\nflow_speed = 0.0\n",
        ] {
            let config: AppConfig = toml::from_str(source).unwrap();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, RelaymapError::Config(_)), "{source}");
        }

        let config: AppConfig = toml::from_str("[layout]\nstandoff_distance = 0.0\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("nope".to_string()), 100.0);
        let err = style.background_color().unwrap_err();
        assert!(err.contains("Invalid background color"));
    }
}
