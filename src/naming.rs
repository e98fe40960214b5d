//! Centralized filename derivation for the `prefix-NNNN.ext` convention.
//!
//! Every output filename the pipeline produces goes through
//! [`sequential_name`], and every width-padded counter in console output
//! goes through [`padded`], so the convention lives in exactly one place.

/// Zero-pad `value` to `width` digits.
///
/// Values wider than `width` are rendered in full, never truncated.
pub fn padded(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

/// Derive the sequential output name, e.g. `wall-0042.png`.
///
/// `ext` is the bare extension without the leading dot.
pub fn sequential_name(prefix: &str, seq: u32, width: usize, ext: &str) -> String {
    format!("{prefix}-{}.{ext}", padded(seq, width))
}

/// Normalize a user-supplied extension to the lowercase dot-prefixed form
/// used for matching: `JPG` → `.jpg`, `.WebP` → `.webp`.
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.').to_lowercase())
}
