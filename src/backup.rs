//! Backup directory lifecycle.
//!
//! Originals are protected by copying or moving them into a subdirectory of
//! the source folder before anything destructive happens to them. A
//! pre-existing file at the destination is always a reported error, never a
//! silent overwrite.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("already exists in backup: {0}")]
    AlreadyExists(PathBuf),
}

/// Create the backup directory if absent. Idempotent.
pub fn ensure_dir(folder: &Path, subdir: &str) -> Result<PathBuf, BackupError> {
    let dir = folder.join(subdir);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn destination(folder: &Path, subdir: &str, file_name: &str) -> Result<PathBuf, BackupError> {
    let dest = folder.join(subdir).join(file_name);
    if dest.exists() {
        return Err(BackupError::AlreadyExists(dest));
    }
    Ok(dest)
}

/// Copy `file_name` from `folder` into the backup directory, preserving the
/// name. The original stays in place.
pub fn copy_into(folder: &Path, subdir: &str, file_name: &str) -> Result<(), BackupError> {
    let dest = destination(folder, subdir, file_name)?;
    fs::copy(folder.join(file_name), dest)?;
    Ok(())
}

/// Move `file_name` from `folder` into the backup directory.
pub fn move_into(folder: &Path, subdir: &str, file_name: &str) -> Result<(), BackupError> {
    let dest = destination(folder, subdir, file_name)?;
    fs::rename(folder.join(file_name), dest)?;
    Ok(())
}

/// Delete the backup directory tree. An absent directory is a no-op.
pub fn purge(folder: &Path, subdir: &str) -> Result<(), BackupError> {
    let dir = folder.join(subdir);
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}
