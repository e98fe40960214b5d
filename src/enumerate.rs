//! Directory enumeration — the first stage of every run.
//!
//! Produces the candidate snapshot: the plain files in the source folder
//! whose extension (case-insensitive) is in the configured set, sorted
//! ascending by filename byte order. The snapshot is computed once per run
//! and never recomputed mid-run, so files appearing or disappearing while
//! the pipeline works are simply not part of this run.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file in the source folder matching the configured extension set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file_name: String,
    /// Lowercase dot-prefixed extension, e.g. `.jpg`.
    pub extension: String,
}

/// The lowercase dot-prefixed extension of a filename, if it has one.
fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// List `folder` (non-recursive) and keep the plain files whose extension is
/// in `extensions`. The result is sorted ascending by filename.
///
/// An empty result is valid; the caller decides whether "nothing to do" is
/// an error.
pub fn collect(folder: &Path, extensions: &[String]) -> Result<Vec<Candidate>, EnumerateError> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if let Some(extension) = extension_of(&file_name)
            && extensions.contains(&extension)
        {
            candidates.push(Candidate {
                file_name,
                extension,
            });
        }
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}
