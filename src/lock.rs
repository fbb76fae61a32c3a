//! Per-document operation lock
//!
//! Both operations rename the document to `<path>.bak` and back; two runs
//! against the same document would race on that name. An advisory `fs2` lock
//! on a `<path>.cabinet-lock` sibling makes overlapping invocations fail fast
//! instead.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{CabinetError, CabinetResult};

/// Exclusive lock scoped to one document path.
///
/// Released on drop; the lock file itself is removed best-effort.
pub struct DocumentLock {
    file: File,
    lock_path: PathBuf,
}

impl DocumentLock {
    /// Acquire the lock for `document`, failing immediately if another
    /// operation holds it.
    pub fn acquire(document: &Path) -> CabinetResult<Self> {
        let lock_path = PathBuf::from(format!("{}.cabinet-lock", document.display()));
        let file = File::create(&lock_path)?;

        file.try_lock_exclusive().map_err(|e| {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                CabinetError::OperationInProgress {
                    path: document.to_path_buf(),
                }
            } else {
                CabinetError::Io(e)
            }
        })?;

        Ok(Self { file, lock_path })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = fs::remove_file(&self.lock_path);
    }
}
