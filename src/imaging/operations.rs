//! High-level image operations used by the pipeline.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ConvertParams;
use std::path::Path;

/// Convert `source` into `output` at exactly `target`.
///
/// The output format is chosen by the output path's extension.
pub fn convert_to(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    target: Dimensions,
) -> Result<(), BackendError> {
    backend.convert(&ConvertParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: target.width,
        height: target.height,
    })
}

/// Check an existing image against `target` and resize it in place when the
/// dimensions differ. A matching image is left untouched.
pub fn ensure_resolution(
    backend: &impl ImageBackend,
    path: &Path,
    target: Dimensions,
) -> Result<(), BackendError> {
    let current = backend.identify(path)?;
    if current == target {
        return Ok(());
    }
    convert_to(backend, path, path, target)
}
