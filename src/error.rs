use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

/// Failures surfaced by plot construction, drawing calls and surface backends.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A required construction parameter was not supplied.
    #[error("missing required '{0}' parameter")]
    MissingParameter(&'static str),

    /// The container handle does not resolve to a mount point.
    #[error("container '{0}' does not resolve to a mount point")]
    InvalidContainer(String),

    /// Bounds or dimensions that would leave the coordinate transform undefined.
    #[error("invalid plot configuration: {0}")]
    InvalidConfiguration(String),

    /// A path or curve was requested with no points.
    #[error("path geometry requires at least one point")]
    EmptyGeometry,

    /// No background snapshot is available.
    #[error("background snapshot stack is empty")]
    EmptyStack,

    #[error("drawing surface backend failed")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// Wraps a backend-specific failure.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PlotError::Backend(Box::new(err))
    }
}

#[cfg(feature = "cairo")]
impl From<cairo::Error> for PlotError {
    fn from(err: cairo::Error) -> Self {
        PlotError::backend(err)
    }
}

#[cfg(feature = "cairo")]
impl From<cairo::BorrowError> for PlotError {
    fn from(err: cairo::BorrowError) -> Self {
        PlotError::backend(err)
    }
}

#[cfg(feature = "export")]
impl From<png::EncodingError> for PlotError {
    fn from(err: png::EncodingError) -> Self {
        PlotError::backend(err)
    }
}
