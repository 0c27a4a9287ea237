//! Plot-space drawing over Canvas-2D-like device surfaces.
//!
//! A [`Plot`] owns a mounted surface and a [`CoordinateMapper`] between a
//! rectangular plot-space region (Y up) and the surface's pixel grid
//! (Y down). Primitives are given in plot coordinates, backgrounds can be
//! captured and restored pixel for pixel, and pointer input arrives in plot
//! coordinates.
//!
//! The surface traits in [`api`] mirror the HTML Canvas 2D context; any
//! backend implementing them can host a plot.

pub mod api;
pub mod backends;
pub mod config;
pub mod error;
pub mod mapper;
pub mod mount;
pub mod plot;
pub mod pointer;
pub mod style;
pub mod surface;

pub use config::{PlotConfig, PlotSettings};
pub use error::{PlotError, Result};
pub use mapper::{CoordinateMapper, DeviceDimensions, PlotBounds};
pub use mount::{Host, SurfaceFactory, SurfaceProvider};
pub use plot::Plot;
pub use pointer::{PointerEvent, PointerEventAdapter};
pub use style::{ArrowHead, DrawStyle, StyleOverride};
pub use surface::SurfaceState;
