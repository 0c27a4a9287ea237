//! Background snapshots: whole-surface pixel captures kept on a stack.

use crate::api::{CanvasImageData, ImageData};
use crate::error::{PlotError, Result};

/// Stack of full-surface pixel captures.
#[derive(Debug, Default)]
pub struct SurfaceState {
    snapshots: Vec<ImageData>,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Captures every pixel of `surface` and pushes it.
    pub fn push<C: CanvasImageData + ?Sized>(
        &mut self,
        surface: &C,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let snapshot = surface.get_image_data(0, 0, width, height)?;
        self.snapshots.push(snapshot);
        log::debug!("pushed background snapshot, depth {}", self.snapshots.len());
        Ok(())
    }

    /// Repaints the top snapshot without removing it.
    pub fn restore<C: CanvasImageData + ?Sized>(&self, surface: &mut C) -> Result<()> {
        let top = self.snapshots.last().ok_or(PlotError::EmptyStack)?;
        surface.put_image_data(top, 0.0, 0.0)
    }

    /// Repaints the top snapshot, then discards it.
    pub fn pop<C: CanvasImageData + ?Sized>(&mut self, surface: &mut C) -> Result<()> {
        self.restore(surface)?;
        self.snapshots.pop();
        log::debug!("popped background snapshot, depth {}", self.snapshots.len());
        Ok(())
    }
}
