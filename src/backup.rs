//! Backup/restore round trip for the document being operated on
//!
//! Invariant: after any operation finishes - success, failure, or unwind -
//! the original filename is present on disk again. The guard restores
//! explicitly on the happy path and best-effort from `Drop` otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CabinetResult;
use crate::paths;

/// Renames a document to its `.bak` sibling and guarantees the rename back.
pub struct BackupGuard {
    original: PathBuf,
    backup: PathBuf,
    armed: bool,
}

impl BackupGuard {
    /// Move `original` out of the way to `<original>.bak`.
    ///
    /// Frees the original filename so the external tool can write the
    /// downloaded copy there without clobbering local content.
    pub fn create(original: &Path) -> CabinetResult<Self> {
        let backup = paths::backup_path(original);
        fs::rename(original, &backup)?;
        Ok(Self {
            original: original.to_path_buf(),
            backup,
            armed: true,
        })
    }

    /// Rename the backup back onto the original path, consuming the guard.
    pub fn restore(mut self) -> CabinetResult<()> {
        self.armed = false;
        fs::rename(&self.backup, &self.original)?;
        Ok(())
    }
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::rename(&self.backup, &self.original);
        }
    }
}
