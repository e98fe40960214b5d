//! Pure Rust image backend — no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, WebP) | `image` crate decoders |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode (PNG, JPEG, WebP) | `image` crate encoders, format by extension |
//!
//! Resizing uses `resize_exact` on purpose: outputs are stretched to the
//! target resolution without preserving aspect ratio, matching the legacy
//! wallpaper tool this replaces.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ConvertParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Extensions with both a decoder and an encoder compiled in.
const FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
];

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    FORMATS
        .iter()
        .find(|(name, _)| *name == ext)
        .map(|(_, format)| *format)
        .ok_or_else(|| BackendError::Conversion {
            path: path.to_path_buf(),
            reason: format!("unsupported output format {ext:?}"),
        })
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::ImageRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let format = format_for(path)?;
    img.save_with_format(path, format)
        .map_err(|e| BackendError::Conversion {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::ImageRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output)
    }
}
