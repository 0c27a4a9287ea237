//! Attaching drawing surfaces to containers.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::api::CanvasRenderingContext2D;
use crate::error::{PlotError, Result};
use crate::mapper::DeviceDimensions;

/// Creates a surface of the requested size and mounts it into `container`.
pub trait SurfaceProvider {
    type Surface: CanvasRenderingContext2D;

    /// Fails with [`PlotError::InvalidContainer`] when `container` does not
    /// resolve to a mount point.
    fn mount(&mut self, container: &str, dimensions: DeviceDimensions) -> Result<Self::Surface>;
}

/// A backend surface that can be allocated at a given pixel size.
pub trait SurfaceFactory: CanvasRenderingContext2D + Sized {
    fn create(dimensions: DeviceDimensions) -> Result<Self>;
}

/// In-process registry of named mount points.
pub struct Host<S> {
    containers: BTreeMap<String, usize>,
    _surface: PhantomData<fn() -> S>,
}

impl<S> fmt::Debug for Host<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("containers", &self.containers)
            .finish()
    }
}

impl<S> Default for Host<S> {
    fn default() -> Self {
        Self {
            containers: BTreeMap::new(),
            _surface: PhantomData,
        }
    }
}

impl<S> Host<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mount point.
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.add_container(id);
        self
    }

    pub fn add_container(&mut self, id: impl Into<String>) {
        self.containers.entry(id.into()).or_insert(0);
    }

    /// Number of surfaces mounted into `id`, or `None` if it is not registered.
    pub fn mounted(&self, id: &str) -> Option<usize> {
        self.containers.get(id).copied()
    }
}

impl<S: SurfaceFactory> SurfaceProvider for Host<S> {
    type Surface = S;

    fn mount(&mut self, container: &str, dimensions: DeviceDimensions) -> Result<S> {
        let Some(count) = self.containers.get_mut(container) else {
            log::warn!("no container registered as '{container}'");
            return Err(PlotError::InvalidContainer(container.to_string()));
        };
        let surface = S::create(dimensions)?;
        *count += 1;
        log::debug!(
            "mounted {}x{} surface into '{container}'",
            dimensions.pixel_width,
            dimensions.pixel_height
        );
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::recording::RecordingCanvas;

    #[test]
    fn mounts_only_into_registered_containers() {
        let mut host: Host<RecordingCanvas> = Host::new().with_container("plot");
        let dims = DeviceDimensions::new(30, 20).unwrap();

        let surface = host.mount("plot", dims).unwrap();
        assert_eq!(surface.size(), (30, 20));
        assert_eq!(host.mounted("plot"), Some(1));

        match host.mount("missing", dims) {
            Err(PlotError::InvalidContainer(id)) => assert_eq!(id, "missing"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("mounted into an unknown container"),
        }
        assert_eq!(host.mounted("missing"), None);
    }
}
