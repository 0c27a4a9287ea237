//! Drawing style defaults and per-call overrides.
//!
//! Sizes are in plot units; only colors and fonts are not. Resolution order
//! for every field is: per-call override, then the plot's instance default,
//! then the built-in constant.

use std::f64::consts::FRAC_PI_2;

pub const DEFAULT_POINT_RADIUS: f64 = 0.01;
pub const DEFAULT_LINE_WIDTH: f64 = 0.01;
pub const DEFAULT_DRAW_COLOR: &str = "black";
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const DEFAULT_FONT: &str = "10px sans-serif";

pub const DEFAULT_ARROW_HEAD_LENGTH: f64 = 0.4;
pub const DEFAULT_ARROW_HEAD_INCIDENT_ANGLE: f64 = FRAC_PI_2;

/// Fully resolved style used for one drawing call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub draw_color: String,
    pub line_width: f64,
    pub point_radius: f64,
    pub font: String,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            draw_color: DEFAULT_DRAW_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            point_radius: DEFAULT_POINT_RADIUS,
            font: DEFAULT_FONT.to_string(),
        }
    }
}

impl DrawStyle {
    /// Merges a partial override over these defaults, field by field.
    pub fn resolve(&self, over: Option<&StyleOverride>) -> DrawStyle {
        let Some(over) = over else {
            return self.clone();
        };
        DrawStyle {
            draw_color: over
                .draw_color
                .clone()
                .unwrap_or_else(|| self.draw_color.clone()),
            line_width: over.line_width.unwrap_or(self.line_width),
            point_radius: over.point_radius.unwrap_or(self.point_radius),
            font: over.font.clone().unwrap_or_else(|| self.font.clone()),
        }
    }
}

/// Partially populated style for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverride {
    pub draw_color: Option<String>,
    pub line_width: Option<f64>,
    pub point_radius: Option<f64>,
    pub font: Option<String>,
}

impl StyleOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.draw_color = Some(color.into());
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn point_radius(mut self, radius: f64) -> Self {
        self.point_radius = Some(radius);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}

/// Geometry of an arrow head: arm length (plot units) and the full angle
/// between the two arms (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub length: f64,
    pub incident_angle: f64,
}

impl Default for ArrowHead {
    fn default() -> Self {
        Self {
            length: DEFAULT_ARROW_HEAD_LENGTH,
            incident_angle: DEFAULT_ARROW_HEAD_INCIDENT_ANGLE,
        }
    }
}

impl ArrowHead {
    /// End points of the two arms for a head whose tip sits at (x, y) and
    /// points along `theta`.
    pub fn arms(&self, x: f64, y: f64, theta: f64) -> [(f64, f64); 2] {
        let half = self.incident_angle / 2.0;
        let arm = |angle: f64| (x - self.length * angle.cos(), y - self.length * angle.sin());
        [arm(theta + half), arm(theta - half)]
    }
}
