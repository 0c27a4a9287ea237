//! Construction parameters for a [`Plot`](crate::plot::Plot).

use serde::Deserialize;

use crate::error::{PlotError, Result};
use crate::mapper::{DeviceDimensions, PlotBounds};
use crate::style::{DEFAULT_BACKGROUND_COLOR, DrawStyle};

/// Raw configuration, field names matching the camelCase keys of a JSON
/// config object. Every field is optional here so absence can be reported
/// as [`PlotError::MissingParameter`]; a zero is a value, not an absence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub container: Option<String>,
    pub pixel_width: Option<f64>,
    pub pixel_height: Option<f64>,
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,

    pub point_radius: Option<f64>,
    pub line_width: Option<f64>,
    pub draw_color: Option<String>,
    pub background_color: Option<String>,
    pub font: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub container: String,
    pub dimensions: DeviceDimensions,
    pub bounds: PlotBounds,
    pub style: DrawStyle,
    pub background_color: String,
}

fn required<T: Clone>(value: &Option<T>, name: &'static str) -> Result<T> {
    value.clone().ok_or_else(|| {
        log::warn!("plot configuration is missing '{name}'");
        PlotError::MissingParameter(name)
    })
}

impl PlotConfig {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    pub fn with_pixels(mut self, width: f64, height: f64) -> Self {
        self.pixel_width = Some(width);
        self.pixel_height = Some(height);
        self
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.min_x = Some(min);
        self.max_x = Some(max);
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.min_y = Some(min);
        self.max_y = Some(max);
        self
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = Some(radius);
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn with_draw_color(mut self, color: impl Into<String>) -> Self {
        self.draw_color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Checks presence of every required parameter first, then the values.
    pub fn validate(&self) -> Result<PlotSettings> {
        let container = required(&self.container, "container")?;
        let pixel_width = required(&self.pixel_width, "pixelWidth")?;
        let pixel_height = required(&self.pixel_height, "pixelHeight")?;
        let min_x = required(&self.min_x, "minX")?;
        let max_x = required(&self.max_x, "maxX")?;
        let min_y = required(&self.min_y, "minY")?;
        let max_y = required(&self.max_y, "maxY")?;

        let dimensions = DeviceDimensions::from_f64(pixel_width, pixel_height)?;
        let bounds = PlotBounds::new(min_x, max_x, min_y, max_y)?;

        let defaults = DrawStyle::default();
        let style = DrawStyle {
            draw_color: self.draw_color.clone().unwrap_or(defaults.draw_color),
            line_width: self.line_width.unwrap_or(defaults.line_width),
            point_radius: self.point_radius.unwrap_or(defaults.point_radius),
            font: self.font.clone().unwrap_or(defaults.font),
        };

        Ok(PlotSettings {
            container,
            dimensions,
            bounds,
            style,
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
        })
    }
}
