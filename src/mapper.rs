//! Affine mapping between plot space (continuous, Y up) and device space
//! (pixels, Y down, origin top-left).

use crate::error::{PlotError, Result};

/// Plot-space extent. `max_x > min_x` and `max_y > min_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotBounds {
    /// Validates and builds bounds; degenerate or non-finite extents are rejected.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        let all_finite = [min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(PlotError::InvalidConfiguration(format!(
                "plot bounds must be finite (x: {min_x}..{max_x}, y: {min_y}..{max_y})"
            )));
        }
        if max_x <= min_x {
            return Err(PlotError::InvalidConfiguration(format!(
                "maxX ({max_x}) must be greater than minX ({min_x})"
            )));
        }
        if max_y <= min_y {
            return Err(PlotError::InvalidConfiguration(format!(
                "maxY ({max_y}) must be greater than minY ({min_y})"
            )));
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Device-space size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDimensions {
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl DeviceDimensions {
    pub fn new(pixel_width: u32, pixel_height: u32) -> Result<Self> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(PlotError::InvalidConfiguration(format!(
                "pixel dimensions must be positive, got {pixel_width}x{pixel_height}"
            )));
        }
        Ok(Self {
            pixel_width,
            pixel_height,
        })
    }

    /// Truncates fractional sizes toward zero before validating.
    pub fn from_f64(pixel_width: f64, pixel_height: f64) -> Result<Self> {
        let truncate = |v: f64, name: &str| -> Result<u32> {
            let t = v.trunc();
            if !t.is_finite() || t < 1.0 || t > f64::from(u32::MAX) {
                return Err(PlotError::InvalidConfiguration(format!(
                    "{name} must be a positive pixel count, got {v}"
                )));
            }
            Ok(t as u32)
        };
        Self::new(
            truncate(pixel_width, "pixelWidth")?,
            truncate(pixel_height, "pixelHeight")?,
        )
    }
}

/// Bidirectional plot/device transform.
///
/// The extents are derived once from the bounds; the struct is immutable so
/// they can never go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    bounds: PlotBounds,
    dims: DeviceDimensions,
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    pub fn new(bounds: PlotBounds, dims: DeviceDimensions) -> Self {
        Self {
            bounds,
            dims,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    pub fn dimensions(&self) -> DeviceDimensions {
        self.dims
    }

    /// Plot-space width (`maxX - minX`).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Plot-space height (`maxY - minY`).
    pub fn height(&self) -> f64 {
        self.height
    }

    fn pixel_width(&self) -> f64 {
        f64::from(self.dims.pixel_width)
    }

    fn pixel_height(&self) -> f64 {
        f64::from(self.dims.pixel_height)
    }

    pub fn plot_to_device_x(&self, x: f64) -> f64 {
        (x - self.bounds.min_x) * self.pixel_width() / self.width
    }

    pub fn plot_to_device_y(&self, y: f64) -> f64 {
        self.pixel_height() - (y - self.bounds.min_y) * self.pixel_height() / self.height
    }

    pub fn device_to_plot_x(&self, px: f64) -> f64 {
        px * self.width / self.pixel_width() + self.bounds.min_x
    }

    pub fn device_to_plot_y(&self, py: f64) -> f64 {
        (self.pixel_height() - py) * self.height / self.pixel_height() + self.bounds.min_y
    }

    pub fn plot_to_device(&self, x: f64, y: f64) -> (f64, f64) {
        (self.plot_to_device_x(x), self.plot_to_device_y(y))
    }

    pub fn device_to_plot(&self, px: f64, py: f64) -> (f64, f64) {
        (self.device_to_plot_x(px), self.device_to_plot_y(py))
    }

    /// Device units per plot unit along each axis. Y is negative: plot Y
    /// grows upward while device Y grows downward.
    pub fn scale_factors(&self) -> (f64, f64) {
        (
            self.pixel_width() / self.width,
            -self.pixel_height() / self.height,
        )
    }

    /// Circles only stay circular when both axes share one scale.
    pub fn is_uniform(&self) -> bool {
        let (sx, sy) = self.scale_factors();
        (sx + sy).abs() <= f64::EPSILON * sx.abs().max(1.0) * 4.0
    }
}
