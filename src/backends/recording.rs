//! Surface that records every drawing call together with the drawing state
//! in effect, without rasterizing anything. Tests use it to check the
//! device-space geometry a plot produces.

use crate::api::*;
use crate::error::Result;
use crate::mapper::DeviceDimensions;
use crate::mount::SurfaceFactory;
use crate::style::{DEFAULT_DRAW_COLOR, DEFAULT_FONT};

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    BezierCurveTo {
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
}

/// Drawing state captured with each recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub line_width: f64,
    pub fill_style: Paint,
    pub stroke_style: Paint,
    pub font: String,
    /// Current transform as (a, b, c, d, e, f).
    pub transform: [f64; 6],
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            fill_style: Paint::from(DEFAULT_DRAW_COLOR),
            stroke_style: Paint::from(DEFAULT_DRAW_COLOR),
            font: DEFAULT_FONT.to_string(),
            transform: IDENTITY,
        }
    }
}

impl DrawState {
    /// Maps a point in the recorded user space to device pixels.
    pub fn to_device(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.transform;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Post-multiplies the transform by `m`, as canvas translate/scale do.
    fn concat(&mut self, m: [f64; 6]) {
        let [a, b, c, d, e, f] = self.transform;
        self.transform = [
            a * m[0] + c * m[1],
            b * m[0] + d * m[1],
            a * m[2] + c * m[3],
            b * m[2] + d * m[3],
            a * m[4] + c * m[5] + e,
            b * m[4] + d * m[5] + f,
        ];
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: Vec<PathCommand>,
        state: DrawState,
    },
    StrokePath {
        path: Vec<PathCommand>,
        state: DrawState,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        state: DrawState,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        state: DrawState,
    },
    /// Pixels written back; transform and paints do not apply.
    PutImageData { data: ImageData, dx: f64, dy: f64 },
}

#[derive(Debug)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Vec<PathCommand>,
    pen: Option<(f64, f64)>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            state: DrawState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            pen: None,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Depth of the save()/restore() stack; zero between balanced calls.
    pub fn saved_states(&self) -> usize {
        self.saved.len()
    }

    fn push_segment(&mut self, command: PathCommand, end: (f64, f64)) {
        self.path.push(command);
        self.pen = Some(end);
    }

    /// Emits the pending path as a fill or stroke op. Empty paths record nothing.
    fn paint_path(&mut self, stroke: bool) {
        if self.path.is_empty() {
            return;
        }
        self.pen = None;
        let path = std::mem::take(&mut self.path);
        let state = self.state.clone();
        self.ops.push(if stroke {
            DrawOp::StrokePath { path, state }
        } else {
            DrawOp::FillPath { path, state }
        });
    }
}

impl SurfaceFactory for RecordingCanvas {
    fn create(dimensions: DeviceDimensions) -> Result<Self> {
        Ok(Self::new(dimensions.pixel_width, dimensions.pixel_height))
    }
}

impl CanvasState for RecordingCanvas {
    fn save(&mut self) -> Result<()> {
        self.saved.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        // Unbalanced restore is a no-op, as on a canvas.
        if let Some(previous) = self.saved.pop() {
            self.state = previous;
        }
        Ok(())
    }
}

impl CanvasTransforms for RecordingCanvas {
    fn scale(&mut self, x: f64, y: f64) -> Result<()> {
        self.state.concat([x, 0.0, 0.0, y, 0.0, 0.0]);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        self.state.concat([1.0, 0.0, 0.0, 1.0, x, y]);
        Ok(())
    }

    fn reset_transform(&mut self) -> Result<()> {
        self.state.transform = IDENTITY;
        Ok(())
    }
}

impl CanvasLineStyles for RecordingCanvas {
    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.state.line_width = value;
        Ok(())
    }
}

impl CanvasFillStrokeStyles for RecordingCanvas {
    fn set_fill_style(&mut self, style: Paint) -> Result<()> {
        self.state.fill_style = style;
        Ok(())
    }

    fn set_stroke_style(&mut self, style: Paint) -> Result<()> {
        self.state.stroke_style = style;
        Ok(())
    }
}

impl CanvasRectangles for RecordingCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let state = self.state.clone();
        self.ops.push(DrawOp::FillRect { x, y, w, h, state });
        Ok(())
    }
}

impl CanvasPaths for RecordingCanvas {
    fn begin_path(&mut self) -> Result<()> {
        self.path.clear();
        self.pen = None;
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.push_segment(PathCommand::MoveTo { x, y }, (x, y));
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        let command = match self.pen {
            Some(_) => PathCommand::LineTo { x, y },
            None => PathCommand::MoveTo { x, y },
        };
        self.push_segment(command, (x, y));
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
        if self.pen.is_none() {
            self.move_to(cp1x, cp1y)?;
        }
        let command = PathCommand::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        };
        self.push_segment(command, (x, y));
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
        let end = (x + radius * end_angle.cos(), y + radius * end_angle.sin());
        let command = PathCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            ccw,
        };
        self.push_segment(command, end);
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        self.paint_path(false);
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.paint_path(true);
        Ok(())
    }
}

impl CanvasText for RecordingCanvas {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.state.font = value;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let state = self.state.clone();
        self.ops.push(DrawOp::FillText {
            text: text.to_owned(),
            x,
            y,
            state,
        });
        Ok(())
    }
}

impl CanvasImageData for RecordingCanvas {
    // Nothing is rasterized, so captures are blank buffers of the requested size.
    fn get_image_data(&self, _sx: u32, _sy: u32, sw: u32, sh: u32) -> Result<ImageData> {
        Ok(ImageData::new(sw, sh))
    }

    fn put_image_data(&mut self, data: &ImageData, dx: f64, dy: f64) -> Result<()> {
        data.check_len()?;
        self.ops.push(DrawOp::PutImageData {
            data: data.clone(),
            dx,
            dy,
        });
        Ok(())
    }
}

impl CanvasRenderingContext2D for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
