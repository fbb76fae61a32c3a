//! Cabinet - compare and single-object deploy companion for NetSuite SDF projects
//!
//! Cabinet wraps the SuiteCloud CLI with two safety-oriented workflows: diff a
//! local file against the server's File Cabinet copy without disturbing local
//! content, and deploy exactly one SDF object by temporarily narrowing the
//! project's deploy manifest.

pub mod backup;
pub mod compare;
pub mod config;
pub mod deploy;
pub mod error;
pub mod lock;
pub mod manifest;
pub mod paths;
pub mod report;
pub mod suitecloud;
pub mod ui;

// Re-exports for convenience
pub use compare::{run_compare, CompareOptions, CompareOutcome};
pub use config::{Config, ConfigWarning};
pub use deploy::{run_deploy_object, DeployOptions, DeployOutcome};
pub use error::{CabinetError, CabinetResult};
pub use report::{JsonSink, Report, ReportSink, TextSink};
pub use suitecloud::{CliOutcome, SdfTool, SuiteCloudCli};
