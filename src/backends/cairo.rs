//! Cairo raster surface behind the `cairo` crate feature. Drawing goes to an
//! in-memory ARGB32 `ImageSurface`, so pixels can be read back and repainted.

use cairo::{Context, Format, ImageSurface, Operator};

use crate::api::*;
use crate::error::{PlotError, Result};
use crate::mapper::DeviceDimensions;
use crate::mount::SurfaceFactory;

#[derive(Clone, Debug)]
struct PaintState {
    fill_style: Paint,
    stroke_style: Paint,
    font: String,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill_style: Paint::Color("#000000".into()),
            stroke_style: Paint::Color("#000000".into()),
            font: "10px sans-serif".into(),
        }
    }
}

/// Adapter that translates canvas calls into Cairo operations on an owned
/// image surface.
pub struct CairoCanvas {
    surface: ImageSurface,
    ctx: Context,
    width: u32,
    height: u32,
    paint: PaintState,
    // Cairo's own save/restore covers transform and line width; paints and
    // font live here and are stacked alongside.
    paint_stack: Vec<PaintState>,
}

impl std::fmt::Debug for CairoCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CairoCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("paint", &self.paint)
            .finish()
    }
}

impl CairoCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let surface = ImageSurface::create(Format::ARgb32, to_i32(width)?, to_i32(height)?)?;
        let ctx = Context::new(&surface)?;
        Ok(Self {
            surface,
            ctx,
            width,
            height,
            paint: PaintState::default(),
            paint_stack: Vec::new(),
        })
    }

    /// Encodes the whole surface as PNG.
    #[cfg(feature = "export")]
    pub fn snapshot_png(&self) -> Result<Vec<u8>> {
        self.get_image_data(0, 0, self.width, self.height)?.encode_png()
    }

    fn apply_paint(&self, paint: &Paint) {
        match paint {
            Paint::Color(s) => {
                let (r, g, b, a) = parse_color(s);
                self.ctx.set_source_rgba(r, g, b, a);
            }
        }
    }

    fn apply_font(&self) {
        let (size, family) = parse_font(&self.paint.font);
        self.ctx
            .select_font_face(family, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        self.ctx.set_font_size(size);
    }
}

impl SurfaceFactory for CairoCanvas {
    fn create(dimensions: DeviceDimensions) -> Result<Self> {
        Self::new(dimensions.pixel_width, dimensions.pixel_height)
    }
}

impl CanvasState for CairoCanvas {
    fn save(&mut self) -> Result<()> {
        self.ctx.save()?;
        self.paint_stack.push(self.paint.clone());
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(paint) = self.paint_stack.pop() {
            self.paint = paint;
            self.ctx.restore()?;
        }
        Ok(())
    }
}

impl CanvasTransforms for CairoCanvas {
    fn scale(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.scale(x, y);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.translate(x, y);
        Ok(())
    }

    fn reset_transform(&mut self) -> Result<()> {
        self.ctx.identity_matrix();
        Ok(())
    }
}

impl CanvasLineStyles for CairoCanvas {
    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.ctx.set_line_width(value);
        Ok(())
    }
}

impl CanvasFillStrokeStyles for CairoCanvas {
    fn set_fill_style(&mut self, style: Paint) -> Result<()> {
        self.paint.fill_style = style;
        Ok(())
    }

    fn set_stroke_style(&mut self, style: Paint) -> Result<()> {
        self.paint.stroke_style = style;
        Ok(())
    }
}

impl CanvasRectangles for CairoCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.ctx.new_path();
        self.ctx.rectangle(x, y, w, h);
        self.apply_paint(&self.paint.fill_style);
        self.ctx.fill()?;
        Ok(())
    }
}

impl CanvasPaths for CairoCanvas {
    fn begin_path(&mut self) -> Result<()> {
        self.ctx.new_path();
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.move_to(x, y);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.line_to(x, y);
        Ok(())
    }

    fn bezier_curve_to(
        &mut self,
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    ) -> Result<()> {
        // Without a current point cairo starts the curve at the first control point.
        self.ctx.curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
        Ok(())
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> Result<()> {
        if ccw {
            self.ctx.arc_negative(x, y, radius, start_angle, end_angle);
        } else {
            self.ctx.arc(x, y, radius, start_angle, end_angle);
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        self.ctx.set_fill_rule(cairo::FillRule::Winding);
        self.apply_paint(&self.paint.fill_style);
        self.ctx.fill()?;
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.apply_paint(&self.paint.stroke_style);
        self.ctx.stroke()?;
        Ok(())
    }
}

impl CanvasText for CairoCanvas {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.paint.font = value;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.apply_font();
        self.apply_paint(&self.paint.fill_style);
        self.ctx.new_path();
        self.ctx.move_to(x, y);
        self.ctx.show_text(text)?;
        self.ctx.new_path();
        Ok(())
    }
}

impl CanvasImageData for CairoCanvas {
    fn get_image_data(&self, sx: u32, sy: u32, sw: u32, sh: u32) -> Result<ImageData> {
        let mut out = ImageData::new(sw, sh);
        let (width, height) = (self.width, self.height);
        let stride = usize::try_from(self.surface.stride()).map_err(PlotError::backend)?;

        self.surface.with_data(|src| {
            for row in 0..sh {
                let y = sy.saturating_add(row);
                if y >= height {
                    break;
                }
                for col in 0..sw {
                    let x = sx.saturating_add(col);
                    if x >= width {
                        break;
                    }
                    let at = y as usize * stride + x as usize * 4;
                    let argb = u32::from_ne_bytes([src[at], src[at + 1], src[at + 2], src[at + 3]]);
                    let dst = (row as usize * sw as usize + col as usize) * 4;
                    out.data[dst..dst + 4].copy_from_slice(&unpremultiply(argb));
                }
            }
        })?;
        Ok(out)
    }

    fn put_image_data(&mut self, data: &ImageData, dx: f64, dy: f64) -> Result<()> {
        data.check_len()?;
        let stride = Format::ARgb32.stride_for_width(data.width)?;
        let row_len = usize::try_from(stride).map_err(PlotError::backend)?;
        let mut buf = vec![0u8; row_len * data.height as usize];
        for (i, chunk) in data.data.chunks_exact(4).enumerate() {
            let x = i % data.width as usize;
            let y = i / data.width as usize;
            let at = y * row_len + x * 4;
            let argb = premultiply([chunk[0], chunk[1], chunk[2], chunk[3]]);
            buf[at..at + 4].copy_from_slice(&argb.to_ne_bytes());
        }
        let source = ImageSurface::create_for_data(
            buf,
            Format::ARgb32,
            to_i32(data.width)?,
            to_i32(data.height)?,
            stride,
        )?;

        self.ctx.save()?;
        self.ctx.identity_matrix();
        self.ctx.reset_clip();
        self.ctx.set_operator(Operator::Source);
        self.ctx.set_source_surface(&source, dx, dy)?;
        self.ctx.new_path();
        self.ctx
            .rectangle(dx, dy, f64::from(data.width), f64::from(data.height));
        let painted = self.ctx.fill();
        self.ctx.restore()?;
        painted?;
        Ok(())
    }
}

impl CanvasRenderingContext2D for CairoCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn to_i32(v: u32) -> Result<i32> {
    i32::try_from(v).map_err(PlotError::backend)
}

/// Cairo ARGB32 (premultiplied, native-endian u32) to straight RGBA bytes.
fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = (argb >> 24) & 0xff;
    let channel = |shift: u32| -> u8 {
        let c = (argb >> shift) & 0xff;
        if a == 0 {
            0
        } else {
            ((c * 255 + a / 2) / a).min(255) as u8
        }
    };
    [channel(16), channel(8), channel(0), a as u8]
}

/// Straight RGBA bytes to Cairo ARGB32.
fn premultiply([r, g, b, a]: [u8; 4]) -> u32 {
    let a = u32::from(a);
    let mul = |c: u8| (u32::from(c) * a + 127) / 255;
    (a << 24) | (mul(r) << 16) | (mul(g) << 8) | mul(b)
}

fn parse_color(color: &str) -> (f64, f64, f64, f64) {
    let c = color.trim().to_ascii_lowercase();
    if let Some(hex) = c.strip_prefix('#') {
        let digit = |s: &str| u8::from_str_radix(s, 16).ok();
        let rgba = match hex.len() {
            3 | 4 => {
                let nibble = |i: usize| hex.get(i..i + 1).and_then(digit).map(|v| v * 17);
                let a = if hex.len() == 4 { nibble(3) } else { Some(255) };
                nibble(0).zip(nibble(1)).zip(nibble(2)).zip(a)
            }
            6 | 8 => {
                let byte = |i: usize| hex.get(i..i + 2).and_then(digit);
                let a = if hex.len() == 8 { byte(6) } else { Some(255) };
                byte(0).zip(byte(2)).zip(byte(4)).zip(a)
            }
            _ => None,
        };
        if let Some((((r, g), b), a)) = rgba {
            return (
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0,
                f64::from(a) / 255.0,
            );
        }
    }

    if let Some(args) = c
        .strip_prefix("rgba(")
        .or_else(|| c.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<f64> = args
            .split(',')
            .filter_map(|p| p.trim().parse::<f64>().ok())
            .collect();
        match parts.as_slice() {
            [r, g, b] => return (r / 255.0, g / 255.0, b / 255.0, 1.0),
            [r, g, b, a] => return (r / 255.0, g / 255.0, b / 255.0, a.clamp(0.0, 1.0)),
            _ => {}
        }
    }

    let named = match c.as_str() {
        "white" => Some((255, 255, 255)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "orange" => Some((255, 165, 0)),
        "purple" => Some((128, 0, 128)),
        "gray" | "grey" => Some((128, 128, 128)),
        "transparent" => return (0.0, 0.0, 0.0, 0.0),
        _ => None,
    };
    if let Some((r, g, b)) = named {
        return (
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        );
    }

    // Anything unrecognized, "black" included, paints opaque black.
    (0.0, 0.0, 0.0, 1.0)
}

fn parse_font(font: &str) -> (f64, &str) {
    // Minimal parser for strings like "16px Sans".
    let mut size = 10.0;
    let mut family = "Sans";
    for part in font.split_whitespace() {
        if let Some(px) = part.strip_suffix("px") {
            if let Ok(v) = px.parse::<f64>() {
                size = v;
            }
        } else {
            family = part;
        }
    }
    (size, family)
}
