//! The plot object: plot-space drawing primitives over a device-space surface.
//!
//! Every primitive except text is issued in a per-call local frame: the
//! device origin is moved to the device position of a plot-space anchor and
//! device units are scaled by `(pixel_width / width, -pixel_height / height)`.
//! The shape's native canvas primitive is then drawn directly in plot units.
//! Sizes such as radii and line widths therefore scale with the plot, but
//! circles and arcs are only circular when both axes share one scale
//! ([`CoordinateMapper::is_uniform`]); otherwise they come out as ellipses.

use std::f64::consts::TAU;

use crate::api::{CanvasRenderingContext2D, Paint};
use crate::config::{PlotConfig, PlotSettings};
use crate::error::{PlotError, Result};
use crate::mapper::CoordinateMapper;
use crate::mount::SurfaceProvider;
use crate::pointer::{PointerEvent, PointerEventAdapter};
use crate::style::{ArrowHead, DrawStyle, StyleOverride};
use crate::surface::SurfaceState;

/// Vertex markers on paths are this fraction of the line width.
const PATH_VERTEX_RADIUS_RATIO: f64 = 0.75;

#[derive(Debug)]
pub struct Plot<C> {
    surface: C,
    mapper: CoordinateMapper,
    style: DrawStyle,
    background_color: String,
    backgrounds: SurfaceState,
    pointer: PointerEventAdapter,
}

/// Runs `draw` between `save()` and `restore()`; the restore happens even
/// when drawing fails.
fn isolated<C, F>(surface: &mut C, draw: F) -> Result<()>
where
    C: CanvasRenderingContext2D,
    F: FnOnce(&mut C) -> Result<()>,
{
    surface.save()?;
    let drawn = draw(surface);
    let restored = surface.restore();
    drawn.and(restored)
}

impl<C: CanvasRenderingContext2D> Plot<C> {
    /// Validates `config`, mounts a surface through `provider`, paints the
    /// background and pushes it as the first snapshot.
    pub fn create<P>(config: &PlotConfig, provider: &mut P) -> Result<Self>
    where
        P: SurfaceProvider<Surface = C>,
    {
        let settings = config.validate()?;
        let surface = provider.mount(&settings.container, settings.dimensions)?;
        Self::with_surface(settings, surface)
    }

    /// Builds a plot over an already mounted surface.
    pub fn with_surface(settings: PlotSettings, surface: C) -> Result<Self> {
        let PlotSettings {
            container,
            dimensions,
            bounds,
            style,
            background_color,
        } = settings;

        let (surface_w, surface_h) = surface.size();
        if (surface_w, surface_h) != (dimensions.pixel_width, dimensions.pixel_height) {
            return Err(PlotError::InvalidConfiguration(format!(
                "surface is {surface_w}x{surface_h} but {}x{} was configured",
                dimensions.pixel_width, dimensions.pixel_height
            )));
        }

        log::debug!(
            "creating plot in '{container}': x {}..{}, y {}..{} on {}x{} px",
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
            dimensions.pixel_width,
            dimensions.pixel_height
        );

        let mut plot = Self {
            surface,
            mapper: CoordinateMapper::new(bounds, dimensions),
            style,
            background_color,
            backgrounds: SurfaceState::new(),
            pointer: PointerEventAdapter::new(),
        };
        plot.paint_background()?;
        plot.push_background()?;
        Ok(plot)
    }

    fn paint_background(&mut self) -> Result<()> {
        let color = Paint::Color(self.background_color.clone());
        let dims = self.mapper.dimensions();
        isolated(&mut self.surface, |s| {
            s.reset_transform()?;
            s.set_fill_style(color)?;
            s.fill_rect(
                0.0,
                0.0,
                f64::from(dims.pixel_width),
                f64::from(dims.pixel_height),
            )
        })
    }

    /// Draws in the local frame anchored at the plot-space point (ax, ay).
    fn in_plot_frame<F>(&mut self, ax: f64, ay: f64, draw: F) -> Result<()>
    where
        F: FnOnce(&mut C) -> Result<()>,
    {
        let (tx, ty) = self.mapper.plot_to_device(ax, ay);
        let (sx, sy) = self.mapper.scale_factors();
        isolated(&mut self.surface, |s| {
            s.translate(tx, ty)?;
            s.scale(sx, sy)?;
            draw(s)
        })
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Plot-space width (`maxX - minX`).
    pub fn width(&self) -> f64 {
        self.mapper.width()
    }

    /// Plot-space height (`maxY - minY`).
    pub fn height(&self) -> f64 {
        self.mapper.height()
    }

    pub fn plot_to_device(&self, x: f64, y: f64) -> (f64, f64) {
        self.mapper.plot_to_device(x, y)
    }

    pub fn device_to_plot(&self, px: f64, py: f64) -> (f64, f64) {
        self.mapper.device_to_plot(px, py)
    }

    /// Instance-level style defaults.
    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn into_surface(self) -> C {
        self.surface
    }

    /// Filled disc of radius `point_radius` centred on (x, y).
    pub fn draw_point(&mut self, x: f64, y: f64, style: Option<&StyleOverride>) -> Result<()> {
        let style = self.style.resolve(style);
        log::trace!("draw_point ({x}, {y}) r={}", style.point_radius);
        self.in_plot_frame(0.0, 0.0, |s| {
            s.set_fill_style(Paint::Color(style.draw_color))?;
            s.begin_path()?;
            s.arc(x, y, style.point_radius, 0.0, TAU, false)?;
            s.fill()
        })
    }

    pub fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let style = self.style.resolve(style);
        log::trace!("draw_line ({x1}, {y1}) -> ({x2}, {y2})");
        self.in_plot_frame(0.0, 0.0, |s| {
            s.set_stroke_style(Paint::Color(style.draw_color))?;
            s.set_line_width(style.line_width)?;
            s.begin_path()?;
            s.move_to(x1, y1)?;
            s.line_to(x2, y2)?;
            s.stroke()
        })
    }

    /// Stroked circle. Circular on screen only under uniform scale.
    pub fn draw_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        self.draw_arc(x, y, radius, 0.0, TAU, false, style)
    }

    /// Stroked arc. Angles are in radians from the positive X axis and sweep
    /// counter-clockwise in plot space unless `clockwise` is set. Circular on
    /// screen only under uniform scale.
    pub fn draw_arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let style = self.style.resolve(style);
        log::trace!("draw_arc ({x}, {y}) r={radius} {start_angle}..{end_angle}");
        // The frame flips Y, so the canvas' default sweep is counter-clockwise here.
        self.in_plot_frame(x, y, |s| {
            s.set_stroke_style(Paint::Color(style.draw_color))?;
            s.set_line_width(style.line_width)?;
            s.begin_path()?;
            s.arc(0.0, 0.0, radius, start_angle, end_angle, clockwise)?;
            s.stroke()
        })
    }

    /// Two strokes meeting at the tip (x, y), opening away from `theta`.
    pub fn draw_arrow_head(
        &mut self,
        x: f64,
        y: f64,
        theta: f64,
        head: Option<ArrowHead>,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let style = self.style.resolve(style);
        let [(ax, ay), (bx, by)] = head.unwrap_or_default().arms(x, y, theta);
        log::trace!("draw_arrow_head ({x}, {y}) theta={theta}");
        self.in_plot_frame(0.0, 0.0, |s| {
            s.set_stroke_style(Paint::Color(style.draw_color))?;
            s.set_line_width(style.line_width)?;
            s.begin_path()?;
            s.move_to(ax, ay)?;
            s.line_to(x, y)?;
            s.line_to(bx, by)?;
            s.stroke()
        })
    }

    /// Polyline through `points`, each vertex marked by a disc of radius
    /// `line_width * 0.75`.
    pub fn draw_path(
        &mut self,
        points: &[(f64, f64)],
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let Some(&(x0, y0)) = points.first() else {
            return Err(PlotError::EmptyGeometry);
        };
        let style = self.style.resolve(style);
        let marker = style.line_width * PATH_VERTEX_RADIUS_RATIO;
        log::trace!("draw_path with {} points", points.len());
        self.in_plot_frame(0.0, 0.0, |s| {
            let paint = Paint::Color(style.draw_color);
            s.set_stroke_style(paint.clone())?;
            s.set_fill_style(paint)?;
            s.set_line_width(style.line_width)?;

            s.begin_path()?;
            s.move_to(x0, y0)?;
            for &(x, y) in &points[1..] {
                s.line_to(x, y)?;
            }
            s.stroke()?;

            for &(x, y) in points {
                s.begin_path()?;
                s.arc(x, y, marker, 0.0, TAU, false)?;
                s.fill()?;
            }
            Ok(())
        })
    }

    /// Smooth stroke from the first to the last point. Each interior point is
    /// used as both control points of a cubic ending midway to the next
    /// point, so the curve bends toward interior points without passing
    /// through them.
    pub fn draw_curve(
        &mut self,
        points: &[(f64, f64)],
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let Some(&(x0, y0)) = points.first() else {
            return Err(PlotError::EmptyGeometry);
        };
        let style = self.style.resolve(style);
        log::trace!("draw_curve with {} points", points.len());
        self.in_plot_frame(0.0, 0.0, |s| {
            s.set_stroke_style(Paint::Color(style.draw_color))?;
            s.set_line_width(style.line_width)?;
            s.begin_path()?;
            s.move_to(x0, y0)?;
            if points.len() > 1 {
                for pair in points[1..].windows(2) {
                    let (cx, cy) = pair[0];
                    let (nx, ny) = pair[1];
                    s.bezier_curve_to(cx, cy, cx, cy, (cx + nx) / 2.0, (cy + ny) / 2.0)?;
                }
                let (lx, ly) = points[points.len() - 1];
                s.line_to(lx, ly)?;
            }
            s.stroke()
        })
    }

    /// Filled rectangle with corner (x, y), extending `width` right and
    /// `height` up in plot space.
    pub fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let style = self.style.resolve(style);
        log::trace!("draw_rect ({x}, {y}) {width}x{height}");
        self.in_plot_frame(0.0, 0.0, |s| {
            s.set_fill_style(Paint::Color(style.draw_color))?;
            s.fill_rect(x, y, width, height)
        })
    }

    /// Fills `text` with its baseline starting at (x, y).
    ///
    /// **(x, y) are device pixels**, not plot coordinates: unlike every other
    /// primitive, text bypasses the plot transform. Use
    /// [`draw_plot_text`](Self::draw_plot_text) to anchor text in plot space.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let style = self.style.resolve(style);
        log::trace!("draw_text {text:?} at device ({x}, {y})");
        isolated(&mut self.surface, |s| {
            s.reset_transform()?;
            s.set_font(style.font)?;
            s.set_fill_style(Paint::Color(style.draw_color))?;
            s.fill_text(text, x, y)
        })
    }

    /// Fills `text` with its baseline starting at the plot-space point (x, y).
    pub fn draw_plot_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: Option<&StyleOverride>,
    ) -> Result<()> {
        let (px, py) = self.mapper.plot_to_device(x, y);
        self.draw_text(text, px, py, style)
    }

    /// Captures the whole surface onto the background stack.
    pub fn push_background(&mut self) -> Result<()> {
        let dims = self.mapper.dimensions();
        self.backgrounds
            .push(&self.surface, dims.pixel_width, dims.pixel_height)
    }

    /// Repaints the most recent background without removing it.
    pub fn restore_to_background(&mut self) -> Result<()> {
        self.backgrounds.restore(&mut self.surface)
    }

    /// Repaints the most recent background and removes it from the stack.
    pub fn pop_background(&mut self) -> Result<()> {
        self.backgrounds.pop(&mut self.surface)
    }

    pub fn background_depth(&self) -> usize {
        self.backgrounds.depth()
    }

    pub fn on_pointer_down(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.pointer.on_pointer_down(handler);
    }

    pub fn on_pointer_up(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.pointer.on_pointer_up(handler);
    }

    pub fn on_pointer_move(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.pointer.on_pointer_move(handler);
    }

    pub fn on_pointer_leave(&mut self, handler: impl FnMut() + 'static) {
        self.pointer.on_pointer_leave(handler);
    }

    /// Feeds a raw input event through to the registered handler. Returns
    /// whether a handler ran.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> bool {
        self.pointer.dispatch(&self.mapper, event)
    }
}
