//! Engine construction options.

use crate::shapes::{Arrow, ShapeStyle};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options accepted when an engine is attached to a surface.
///
/// Every field is optional when deserializing; missing fields take the defaults.
/// Keys are camelCase so a JavaScript options object maps directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Initial stroke color.
    pub color: String,
    /// Initial stroke width.
    pub line_width: f64,
    /// Corner radius for rectangles, clamped per rectangle to half its smaller side.
    #[serde(alias = "radius")]
    pub corner_radius: f64,
    /// Tool active when the surface is attached.
    #[serde(alias = "shape")]
    pub initial_tool: ToolKind,
    /// Arrowhead half-width in degrees.
    pub arrow_head_spread: f64,
    /// Minimum time between processed pointer-move events.
    pub min_move_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let style = ShapeStyle::default();
        Self {
            color: style.color,
            line_width: style.line_width,
            corner_radius: 0.0,
            initial_tool: ToolKind::default(),
            arrow_head_spread: Arrow::DEFAULT_HEAD_SPREAD,
            min_move_interval_ms: 10,
        }
    }
}

impl EngineConfig {
    /// Parse options from JSON, e.g. `{"color": "red", "initialTool": "rect"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.initial_tool = tool;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn min_move_interval(&self) -> Duration {
        Duration::from_millis(self.min_move_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.color, "black");
        assert_eq!(config.line_width, 2.0);
        assert_eq!(config.corner_radius, 0.0);
        assert_eq!(config.initial_tool, ToolKind::Line);
        assert_eq!(config.arrow_head_spread, 25.0);
        assert_eq!(config.min_move_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json(r#"{"color": "red", "initialTool": "rect", "lineWidth": 5}"#)
                .unwrap();
        assert_eq!(config.color, "red");
        assert_eq!(config.initial_tool, ToolKind::Rect);
        assert_eq!(config.line_width, 5.0);
        assert_eq!(config.corner_radius, 0.0);
    }

    #[test]
    fn test_legacy_keys() {
        let config = EngineConfig::from_json(r#"{"radius": 6, "shape": "arrow"}"#).unwrap();
        assert_eq!(config.corner_radius, 6.0);
        assert_eq!(config.initial_tool, ToolKind::Arrow);
    }

    #[test]
    fn test_unknown_tool_rejected() {
        assert!(EngineConfig::from_json(r#"{"initialTool": "star"}"#).is_err());
    }
}
