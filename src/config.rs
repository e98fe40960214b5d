//! Per-run configuration.
//!
//! A [`RunConfig`] is constructed once at the CLI boundary, validated, and
//! passed by reference into every component. Nothing reads ambient state;
//! the config value is the single source of truth for a run.

use crate::imaging::Dimensions;
use crate::naming;
use std::path::PathBuf;
use thiserror::Error;

/// Name of the backup subdirectory created inside the source folder.
pub const BACKUP_SUBDIR: &str = "backups";

/// Every output is resized to exactly this resolution unless overridden.
pub const DEFAULT_TARGET: Dimensions = Dimensions {
    width: 1920,
    height: 1080,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("padding width must be at least 1")]
    ZeroPadding,
}

/// Which end-to-end workflow the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Convert every candidate to the target format/resolution under its
    /// sequential name, then delete or back up the original. Zero matches
    /// is a no-op; partial failures never block completion.
    Convert,
    /// Stage every candidate into the backup directory, fix resolutions in
    /// place, then rename to the sequential pattern. Zero matches is fatal,
    /// and any failure retains the backups for recovery.
    Rename,
}

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub folder: PathBuf,
    /// Lowercase, dot-prefixed; see [`naming::normalize_extension`].
    pub extensions: Vec<String>,
    /// Prefix of derived filenames.
    pub prefix: String,
    /// First sequence number.
    pub start: u32,
    /// Zero-padding width for sequence numbers and progress counters.
    pub leading: usize,
    /// Retain the backup directory after a clean run.
    pub keep_backups: bool,
    pub backup_subdir: String,
    pub target: Dimensions,
    /// Extension of derived filenames, without the dot.
    pub target_ext: String,
    pub workflow: Workflow,
}

impl RunConfig {
    /// Build a validated config.
    ///
    /// `extensions` may arrive in any case, with or without leading dots;
    /// an empty list falls back to the workflow's default set (jpg/webp for
    /// convert, png for rename).
    pub fn new(
        workflow: Workflow,
        folder: PathBuf,
        extensions: Vec<String>,
        prefix: String,
        start: u32,
        leading: usize,
        keep_backups: bool,
    ) -> Result<Self, ConfigError> {
        if leading == 0 {
            return Err(ConfigError::ZeroPadding);
        }

        let extensions = if extensions.is_empty() {
            match workflow {
                Workflow::Convert => vec![".jpg".to_string(), ".webp".to_string()],
                Workflow::Rename => vec![".png".to_string()],
            }
        } else {
            extensions
                .iter()
                .map(|e| naming::normalize_extension(e))
                .collect()
        };

        Ok(Self {
            folder,
            extensions,
            prefix,
            start,
            leading,
            keep_backups,
            backup_subdir: BACKUP_SUBDIR.to_string(),
            target: DEFAULT_TARGET,
            target_ext: "png".to_string(),
            workflow,
        })
    }
}
