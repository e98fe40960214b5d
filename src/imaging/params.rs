//! Parameter types for image operations.
//!
//! These describe *what* to do, not *how*: the interface between the
//! high-level [`operations`](super::operations) and the backend doing the
//! pixel work, so backends can be swapped (e.g. the recording mock in
//! tests) without changing pipeline logic.

use std::path::PathBuf;

/// Full specification for one conversion: decode `source`, resize to
/// exactly `width`x`height`, encode at `output` in the format named by its
/// extension. `output == source` resizes in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}
