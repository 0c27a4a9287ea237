//! Drawing-surface contract modelled on the HTML Canvas 2D context.
//! A plot renders through these traits only; implement them for any
//! backend that can stroke/fill paths in a transformable local frame and
//! read back or repaint its pixels.

use crate::error::{PlotError, Result};

/// Paint used for fill/stroke.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// CSS-style color string (`"black"`, `"#ff0000"`, ...).
    Color(String),
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Color(color.to_string())
    }
}

/// Captured RGBA8 pixels in row-major order with straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ImageData {
    /// A fully transparent buffer. Mirrors createImageData(width, height).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Returns the RGBA quadruple at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub(crate) fn check_len(&self) -> Result<()> {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4));
        if expected != Some(self.data.len()) {
            return Err(PlotError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "RGBA buffer length does not match width*height*4",
            )));
        }
        Ok(())
    }

    /// Encodes the pixels as a PNG file.
    #[cfg(feature = "export")]
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        use png::{ColorType, Encoder as PngEncoder};

        self.check_len()?;
        let mut png_bytes = Vec::new();
        let mut encoder = PngEncoder::new(&mut png_bytes, self.width, self.height);
        encoder.set_color(ColorType::Rgba);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)?;
        writer.finish()?;
        Ok(png_bytes)
    }

    /// PNG `data:` URL of the pixels. Mirrors HTMLCanvasElement.toDataURL().
    #[cfg(feature = "export")]
    pub fn to_data_url(&self) -> Result<String> {
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

        let encoded = BASE64_STANDARD.encode(self.encode_png()?);
        Ok(format!("data:image/png;base64,{}", encoded))
    }
}

pub trait CanvasState {
    /// Pushes the current drawing state (transform, styles, font). Mirrors save().
    fn save(&mut self) -> Result<()>;
    /// Pops the last saved drawing state. Mirrors restore().
    fn restore(&mut self) -> Result<()>;
}

pub trait CanvasTransforms {
    /// Multiplies the current transform by a scaling matrix. Mirrors scale().
    fn scale(&mut self, x: f64, y: f64) -> Result<()>;
    /// Translates the current transform by (x, y). Mirrors translate().
    fn translate(&mut self, x: f64, y: f64) -> Result<()>;
    /// Resets the transform to the identity matrix. Mirrors resetTransform().
    fn reset_transform(&mut self) -> Result<()>;
}

pub trait CanvasLineStyles {
    /// Sets stroke thickness in user units. Mirrors lineWidth.
    fn set_line_width(&mut self, value: f64) -> Result<()>;
}

pub trait CanvasFillStrokeStyles {
    /// Sets the paint used for fills. Mirrors fillStyle.
    fn set_fill_style(&mut self, style: Paint) -> Result<()>;

    /// Sets the paint used for strokes. Mirrors strokeStyle.
    fn set_stroke_style(&mut self, style: Paint) -> Result<()>;
}

pub trait CanvasRectangles {
    /// Fills the rectangle using the current fill style. Mirrors fillRect().
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;
}

pub trait CanvasPaths {
    /// Starts a new empty path. Mirrors beginPath().
    fn begin_path(&mut self) -> Result<()>;
    /// Moves the current point without drawing. Mirrors moveTo().
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds a straight line from the current point. Mirrors lineTo().
    fn line_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds a cubic Bezier curve. Mirrors bezierCurveTo().
    fn bezier_curve_to(
        &mut self,
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    ) -> Result<()>;
    /// Adds a circular arc; `ccw` sweeps against increasing angle. Mirrors arc().
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> Result<()>;

    /// Fills the current path (non-zero winding). Mirrors fill().
    fn fill(&mut self) -> Result<()>;
    /// Strokes the current path. Mirrors stroke().
    fn stroke(&mut self) -> Result<()>;
}

pub trait CanvasText {
    /// Sets the CSS font string. Mirrors font.
    fn set_font(&mut self, value: String) -> Result<()>;

    /// Fills text with its alphabetic baseline starting at (x, y). Mirrors fillText().
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
}

pub trait CanvasImageData {
    /// Copies a device-pixel rectangle, ignoring the current transform. Mirrors getImageData().
    fn get_image_data(&self, sx: u32, sy: u32, sw: u32, sh: u32) -> Result<ImageData>;
    /// Replaces device pixels at (dx, dy), ignoring transform and compositing.
    /// Mirrors putImageData().
    fn put_image_data(&mut self, data: &ImageData, dx: f64, dy: f64) -> Result<()>;
}

/// Everything a plot needs from its drawing surface.
pub trait CanvasRenderingContext2D:
    CanvasState
    + CanvasTransforms
    + CanvasLineStyles
    + CanvasFillStrokeStyles
    + CanvasRectangles
    + CanvasPaths
    + CanvasText
    + CanvasImageData
{
    /// Surface size in device pixels.
    fn size(&self) -> (u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_is_row_major() {
        let mut img = ImageData::new(2, 2);
        img.data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let img = ImageData {
            width: 2,
            height: 2,
            data: vec![0; 3],
        };
        match img.check_len() {
            Err(PlotError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(feature = "export")]
    #[test]
    fn data_url_inlines_png() {
        let img = ImageData {
            width: 1,
            height: 1,
            data: vec![255, 0, 0, 255],
        };
        let png = img.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert!(img.to_data_url().unwrap().starts_with("data:image/png;base64,"));
    }
}
