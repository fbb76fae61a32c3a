//! SuiteCloud CLI collaborator
//!
//! The SuiteCloud CLI reports some failures with a zero exit code, so success
//! is classified as "exited cleanly AND printed the known success banner".
//! The banner text is version-sensitive; both patterns live in configuration
//! so a CLI upgrade is a config edit, not a code change.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::{CabinetError, CabinetResult};

/// Banner printed by `suitecloud file:import` on success.
pub const IMPORT_SUCCESS_PATTERN: &str = "The following files were imported:";

/// Banner printed by `suitecloud project:deploy` on success.
pub const DEPLOY_SUCCESS_PATTERN: &str = "Installation COMPLETE (";

/// Result of one external CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    /// Clean exit with the success banner present in stdout
    Success { output: String },
    /// Non-zero exit, signal termination, or missing success banner
    Failure {
        exit_code: Option<i32>,
        output: String,
    },
}

impl CliOutcome {
    /// Captured stdout+stderr, whichever way the invocation went
    pub fn output(&self) -> &str {
        match self {
            CliOutcome::Success { output } => output,
            CliOutcome::Failure { output, .. } => output,
        }
    }
}

/// Abstraction over the external SDF tooling.
///
/// Implementations:
/// - `SuiteCloudCli` - spawns the real `suitecloud` binary
/// - `MockTool` - in-memory, for unit tests
pub trait SdfTool {
    /// Tool name for display
    fn name(&self) -> &str;

    /// Check whether the tool can be spawned at all
    fn is_available(&self) -> bool;

    /// Download one File Cabinet file into the local checkout.
    ///
    /// Writes the server copy at `src/FileCabinet<cabinet_path>` below
    /// `project_root`.
    fn import(&self, project_root: &Path, cabinet_path: &str) -> CabinetResult<CliOutcome>;

    /// Deploy the project according to the manifest currently on disk.
    fn deploy(&self, project_root: &Path) -> CabinetResult<CliOutcome>;
}

/// The real SuiteCloud CLI, spawned as a child process per operation.
pub struct SuiteCloudCli {
    binary: String,
    import_success_pattern: String,
    deploy_success_pattern: String,
}

impl SuiteCloudCli {
    pub fn from_config(config: &Config) -> Self {
        Self {
            binary: config.suitecloud.binary.clone(),
            import_success_pattern: config.suitecloud.import_success_pattern.clone(),
            deploy_success_pattern: config.suitecloud.deploy_success_pattern.clone(),
        }
    }

    /// Check if the binary is installed and spawnable
    pub fn check_available(binary: &str) -> bool {
        // suitecloud without args exits non-zero, but if we can spawn it,
        // it's available. Stdin is nulled so a build that prompts when
        // invoked bare cannot hang the probe.
        Command::new(binary)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn run(
        &self,
        project_root: &Path,
        args: &[&str],
        success_pattern: &str,
    ) -> CabinetResult<CliOutcome> {
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CabinetError::ToolNotFound {
                    binary: self.binary.clone(),
                },
                _ => CabinetError::Io(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Ok(classify(
            output.status.success(),
            output.status.code(),
            &stdout,
            &stderr,
            success_pattern,
        ))
    }
}

impl SdfTool for SuiteCloudCli {
    fn name(&self) -> &str {
        &self.binary
    }

    fn is_available(&self) -> bool {
        Self::check_available(&self.binary)
    }

    fn import(&self, project_root: &Path, cabinet_path: &str) -> CabinetResult<CliOutcome> {
        self.run(
            project_root,
            &[
                "file:import",
                "--paths",
                cabinet_path,
                "--excludeproperties",
            ],
            &self.import_success_pattern,
        )
    }

    fn deploy(&self, project_root: &Path) -> CabinetResult<CliOutcome> {
        self.run(
            project_root,
            &["project:deploy"],
            &self.deploy_success_pattern,
        )
    }
}

/// Classify a finished invocation.
///
/// The banner is matched against stdout only; stderr is carried along for
/// display. A clean exit without the banner is still a failure, reported with
/// exit code 1 to mirror what the CLI itself does for soft errors.
fn classify(
    exited_ok: bool,
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
    success_pattern: &str,
) -> CliOutcome {
    let output = if stderr.is_empty() {
        stdout.to_string()
    } else {
        format!("{}{}", stdout, stderr)
    };

    if !exited_ok {
        CliOutcome::Failure { exit_code, output }
    } else if stdout.contains(success_pattern) {
        CliOutcome::Success { output }
    } else {
        CliOutcome::Failure {
            exit_code: Some(1),
            output,
        }
    }
}

/// Mock tool for unit tests: canned outcomes, optional fake download.
#[cfg(test)]
pub struct MockTool {
    pub import_outcome: CliOutcome,
    pub deploy_outcome: CliOutcome,
    /// Content written to `src/FileCabinet<cabinet_path>` on successful import
    pub remote_content: Option<String>,
}

#[cfg(test)]
impl MockTool {
    pub fn importing(remote_content: &str) -> Self {
        Self {
            import_outcome: CliOutcome::Success {
                output: format!("{}\n/mock\n", IMPORT_SUCCESS_PATTERN),
            },
            deploy_outcome: CliOutcome::Success {
                output: format!("{}0.1s)\n", DEPLOY_SUCCESS_PATTERN),
            },
            remote_content: Some(remote_content.to_string()),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            import_outcome: CliOutcome::Failure {
                exit_code: Some(exit_code),
                output: "An error occurred.\n".to_string(),
            },
            deploy_outcome: CliOutcome::Failure {
                exit_code: Some(exit_code),
                output: "An error occurred.\n".to_string(),
            },
            remote_content: None,
        }
    }
}

#[cfg(test)]
impl SdfTool for MockTool {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn import(&self, project_root: &Path, cabinet_path: &str) -> CabinetResult<CliOutcome> {
        if let (CliOutcome::Success { .. }, Some(content)) =
            (&self.import_outcome, &self.remote_content)
        {
            let relative = cabinet_path.trim_start_matches('/');
            let target = project_root.join("src/FileCabinet").join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, content)?;
        }
        Ok(self.import_outcome.clone())
    }

    fn deploy(&self, _project_root: &Path) -> CabinetResult<CliOutcome> {
        Ok(self.deploy_outcome.clone())
    }
}
