//! Compare a local file against its File Cabinet copy
//!
//! The original filename must be free while the CLI downloads the server
//! copy, so the sequence is: rename local to `.bak`, import, move the
//! download to a timestamped sibling, rename the backup back. On every exit
//! path the original path ends up holding the local content again.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::BackupGuard;
use crate::error::{CabinetError, CabinetResult};
use crate::lock::DocumentLock;
use crate::paths;
use crate::report::{Report, ReportSink};
use crate::suitecloud::{CliOutcome, SdfTool};

#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    /// Leave the downloaded copy on disk instead of removing it
    pub keep_remote_copy: bool,
}

/// What a successful compare left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOutcome {
    pub document: PathBuf,
    /// Path of the retained download, when `keep_remote_copy` was set
    pub remote_copy: Option<PathBuf>,
}

/// Deletes the downloaded copy once the diff has been shown.
///
/// The fallback disposal: even if rendering errors out, the temp file does
/// not outlive the operation unless the caller asked to keep it.
struct RemoteCopy {
    path: PathBuf,
    keep: bool,
}

impl RemoteCopy {
    fn into_kept(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for RemoteCopy {
    fn drop(&mut self) {
        if !self.keep {
            let _ = fs::remove_file(&self.path);
        }
    }
}

pub fn run_compare(
    document: &Path,
    tool: &dyn SdfTool,
    sink: &dyn ReportSink,
    options: &CompareOptions,
) -> CabinetResult<CompareOutcome> {
    sink.emit(Report::DownloadStarted {
        document: document.to_path_buf(),
    });

    if !document.is_file() {
        return Err(CabinetError::DocumentNotFound {
            path: document.to_path_buf(),
        });
    }

    let cabinet_path = paths::cabinet_path(document);
    let project_root = paths::compare_project_root(document);

    let _lock = DocumentLock::acquire(document)?;
    let guard = BackupGuard::create(document)?;

    let outcome = tool.import(&project_root, &cabinet_path)?;
    sink.emit(Report::ToolOutput {
        output: outcome.output().to_string(),
    });

    match outcome {
        CliOutcome::Failure { exit_code, .. } => {
            // guard drops here and renames the backup back
            Err(CabinetError::ImportFailed { exit_code })
        }
        CliOutcome::Success { .. } => {
            // The download now sits at the original path. Move it aside
            // before the backup reclaims its name.
            let remote_copy = RemoteCopy {
                path: paths::timestamped_copy_path(document),
                keep: false,
            };
            fs::rename(document, &remote_copy.path)?;
            guard.restore()?;

            let local = read_lossy(document)?;
            let remote = read_lossy(&remote_copy.path)?;
            sink.emit(Report::Diff {
                document: document.to_path_buf(),
                remote_copy: remote_copy.path.clone(),
                local,
                remote,
            });

            let kept = if options.keep_remote_copy {
                let path = remote_copy.into_kept();
                sink.emit(Report::RemoteCopyKept { path: path.clone() });
                Some(path)
            } else {
                None
            };

            sink.emit(Report::CompareFinished {
                document: document.to_path_buf(),
            });
            Ok(CompareOutcome {
                document: document.to_path_buf(),
                remote_copy: kept,
            })
        }
    }
}

fn read_lossy(path: &Path) -> CabinetResult<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
