//! Image operations behind a swappable backend.
//!
//! The module is split into:
//! - **Backend**: the [`ImageBackend`] trait + [`RustBackend`], the
//!   production implementation on the `image` crate (pure Rust, statically
//!   linked, no external tools)
//! - **Parameters**: data describing one conversion
//! - **Operations**: the two calls the pipeline makes, [`convert_to`] and
//!   [`ensure_resolution`]

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{convert_to, ensure_resolution};
pub use params::ConvertParams;
pub use rust_backend::RustBackend;
