//! Test environment builder for isolated cabinet testing.
//!
//! Provides `TestEnv` - a throwaway SDF project tree with an optional fake
//! `suitecloud` script, plus helpers to run the cabinet binary against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::DEFAULT_MANIFEST;

/// Result of running a cabinet CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated SDF project with a fake SuiteCloud CLI.
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Path of the installed fake suitecloud script, if any
    stub_bin: Option<PathBuf>,
    /// Path to the cabinet binary
    cabinet_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Read a project file's content
    pub fn read_project_file(&self, relative: &str) -> String {
        let full_path = self.project_path(relative);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read project file {}: {}", relative, e))
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative: &str, content: &str) {
        let full_path = self.project_path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// File names in a project subdirectory matching `<prefix>*<suffix>`
    pub fn files_matching(&self, dir: &str, prefix: &str, suffix: &str) -> Vec<String> {
        let full_dir = self.project_path(dir);
        let mut names: Vec<String> = std::fs::read_dir(&full_dir)
            .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir, e))
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(prefix) && n.ends_with(suffix))
            .collect();
        names.sort();
        names
    }

    /// Run cabinet in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run cabinet with extra env vars layered on top of the defaults
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.cabinet_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("CABINET_NO_COLOR", "1");

        if let Some(stub) = &self.stub_bin {
            cmd.env("CABINET_SUITECLOUD_BIN", stub);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute cabinet");
        self.output_to_result(output)
    }

    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Find the cabinet binary to use for testing
    fn find_cabinet_binary() -> PathBuf {
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());

        let debug_bin = PathBuf::from(&manifest_dir).join("target/debug/cabinet");
        if debug_bin.exists() {
            return debug_bin;
        }

        let release_bin = PathBuf::from(&manifest_dir).join("target/release/cabinet");
        if release_bin.exists() {
            return release_bin;
        }

        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("target")
            .join("debug")
            .join("cabinet")
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    cabinet_files: Vec<(String, String)>,
    object_files: Vec<(String, String)>,
    manifest: String,
    stub_script: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            cabinet_files: Vec::new(),
            object_files: Vec::new(),
            manifest: DEFAULT_MANIFEST.to_string(),
            stub_script: None,
        }
    }

    /// Add a file below `src/FileCabinet/`
    pub fn with_cabinet_file(mut self, relative: &str, content: &str) -> Self {
        self.cabinet_files
            .push((relative.to_string(), content.to_string()));
        self
    }

    /// Add an object file below `src/Objects/`
    pub fn with_object_file(mut self, relative: &str, content: &str) -> Self {
        self.object_files
            .push((relative.to_string(), content.to_string()));
        self
    }

    /// Replace the default `src/deploy.xml` content
    pub fn with_manifest(mut self, content: &str) -> Self {
        self.manifest = content.to_string();
        self
    }

    /// Install a fake `suitecloud` shell script
    pub fn with_suitecloud_stub(mut self, script: &str) -> Self {
        self.stub_script = Some(script.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create temp project");
        let root = project_root.path();

        std::fs::create_dir_all(root.join("src/FileCabinet")).unwrap();
        std::fs::create_dir_all(root.join("src/Objects")).unwrap();
        std::fs::write(root.join("src/deploy.xml"), &self.manifest).unwrap();

        for (relative, content) in &self.cabinet_files {
            let path = root.join("src/FileCabinet").join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
        }
        for (relative, content) in &self.object_files {
            let path = root.join("src/Objects").join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
        }

        let stub_bin = self.stub_script.map(|script| {
            let bin_dir = root.join("stub-bin");
            std::fs::create_dir_all(&bin_dir).unwrap();
            let stub = bin_dir.join("suitecloud");
            std::fs::write(&stub, script).unwrap();
            make_executable(&stub);
            stub
        });

        TestEnv {
            project_root,
            stub_bin,
            cabinet_bin: TestEnv::find_cabinet_binary(),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
