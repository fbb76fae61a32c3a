//! Error types for Cabinet
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these
//! in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Cabinet operations
pub type CabinetResult<T> = Result<T, CabinetError>;

/// Main error type for Cabinet operations
#[derive(Error, Debug)]
pub enum CabinetError {
    /// The file named on the command line does not exist
    #[error("document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Another compare/deploy run holds the per-document lock
    #[error("another cabinet operation is already running against {path}")]
    OperationInProgress { path: PathBuf },

    /// The SuiteCloud CLI binary could not be spawned
    #[error("'{binary}' not found - install the SuiteCloud CLI or set suitecloud.binary in cabinet.toml")]
    ToolNotFound { binary: String },

    /// `suitecloud file:import` exited non-zero or without the success banner
    #[error("suitecloud file:import failed with exit code {}", exit_code_label(.exit_code))]
    ImportFailed { exit_code: Option<i32> },

    /// `suitecloud project:deploy` exited non-zero or without the success banner
    #[error("suitecloud project:deploy failed with exit code {}", exit_code_label(.exit_code))]
    DeployFailed { exit_code: Option<i32> },

    /// The project has no deploy manifest to narrow
    #[error("deploy manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Malformed cabinet.toml
    #[error("invalid config in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal?)".to_string(),
    }
}
