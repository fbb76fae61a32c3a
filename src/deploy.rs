//! Single-object deploy
//!
//! Stages one object file into a scratch subfolder, narrows the manifest to
//! that subfolder, runs `project:deploy`, and tears everything down again.
//! Teardown (staging folder removed, manifest restored from backup) runs on
//! every exit path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CabinetError, CabinetResult};
use crate::lock::DocumentLock;
use crate::manifest;
use crate::paths;
use crate::report::{Report, ReportSink};
use crate::suitecloud::{CliOutcome, SdfTool};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    /// Stage and show the scoped manifest, but skip the remote deploy
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The file is not under `src/Objects/`; nothing was touched
    Skipped,
    /// Dry run: staged, manifest shown, torn down
    Staged,
    /// Deployed and torn down
    Deployed,
}

/// The staged state of a deploy: scratch folder plus narrowed manifest.
///
/// `teardown` is the real cleanup; `Drop` is the fallback for error unwinds.
struct StagedDeploy {
    project_root: PathBuf,
    staging_dir: PathBuf,
    manifest_backed_up: bool,
    armed: bool,
}

impl StagedDeploy {
    fn create(project_root: &Path, document: &Path) -> CabinetResult<Self> {
        let staging_dir = project_root.join("src/Objects").join(manifest::STAGING_DIR);
        fs::create_dir_all(&staging_dir)?;

        let mut staged = Self {
            project_root: project_root.to_path_buf(),
            staging_dir,
            manifest_backed_up: false,
            armed: true,
        };
        staged.populate(document)?;
        Ok(staged)
    }

    fn populate(&mut self, document: &Path) -> CabinetResult<()> {
        let file_name = document
            .file_name()
            .ok_or_else(|| CabinetError::DocumentNotFound {
                path: document.to_path_buf(),
            })?;
        fs::copy(document, self.staging_dir.join(file_name))?;

        manifest::backup_manifest(&self.project_root)?;
        self.manifest_backed_up = true;
        manifest::write_scoped_manifest(&self.project_root)?;
        Ok(())
    }

    /// Remove the staging folder and restore the manifest from backup.
    ///
    /// Both steps run even if the other fails; a stuck staging folder must
    /// not leave the narrowed manifest live at `src/deploy.xml`.
    fn teardown(mut self) -> CabinetResult<()> {
        self.armed = false;
        let removed = fs::remove_dir_all(&self.staging_dir);
        if self.manifest_backed_up {
            manifest::restore_manifest(&self.project_root)?;
        }
        removed?;
        Ok(())
    }
}

impl Drop for StagedDeploy {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_dir_all(&self.staging_dir);
            if self.manifest_backed_up {
                let _ = manifest::restore_manifest(&self.project_root);
            }
        }
    }
}

pub fn run_deploy_object(
    document: &Path,
    tool: &dyn SdfTool,
    sink: &dyn ReportSink,
    options: &DeployOptions,
) -> CabinetResult<DeployOutcome> {
    // No marker, no mutation: this is a quiet no-op, not an error.
    let Some(project_root) = paths::object_project_root(document) else {
        sink.emit(Report::ObjectSkipped {
            document: document.to_path_buf(),
        });
        return Ok(DeployOutcome::Skipped);
    };

    sink.emit(Report::StagingStarted {
        document: document.to_path_buf(),
    });

    if !document.is_file() {
        return Err(CabinetError::DocumentNotFound {
            path: document.to_path_buf(),
        });
    }

    let _lock = DocumentLock::acquire(document)?;
    let staged = StagedDeploy::create(&project_root, document)?;

    // Collect the remote step's result before teardown so cleanup runs on
    // failure too.
    let remote_result = if options.dry_run {
        sink.emit(Report::ScopedManifest {
            content: manifest::scoped_manifest(),
        });
        Ok(DeployOutcome::Staged)
    } else {
        match tool.deploy(&project_root) {
            Ok(outcome) => {
                sink.emit(Report::ToolOutput {
                    output: outcome.output().to_string(),
                });
                match outcome {
                    CliOutcome::Success { .. } => Ok(DeployOutcome::Deployed),
                    CliOutcome::Failure { exit_code, .. } => {
                        Err(CabinetError::DeployFailed { exit_code })
                    }
                }
            }
            Err(e) => Err(e),
        }
    };

    let teardown_result = staged.teardown();

    let outcome = remote_result?;
    teardown_result?;

    if outcome == DeployOutcome::Deployed {
        sink.emit(Report::DeployFinished {
            document: document.to_path_buf(),
        });
    }
    Ok(outcome)
}
