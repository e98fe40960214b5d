//! Image backend trait and shared types.
//!
//! [`ImageBackend`] defines the two operations the pipeline needs: identify
//! and convert. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the
//! recording mock below so pipeline logic can be exercised without decoding
//! a single pixel.

use super::params::ConvertParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable image {path}: {reason}")]
    ImageRead { path: PathBuf, reason: String },
    #[error("conversion failed for {path}: {reason}")]
    Conversion { path: PathBuf, reason: String },
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image backends.
///
/// Both operations are blocking. The pipeline is sequential by design and
/// relies on each call running to completion before the next item starts.
pub trait ImageBackend {
    /// Read the dimensions of an existing image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, resize to exactly the given dimensions, and
    /// encode at the output path in the format its extension names.
    /// Output and source may be the same path (in-place resize).
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
