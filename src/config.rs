//! Configuration module for Cabinet
//!
//! Configuration hierarchy:
//! 1. Environment variables (CABINET_*)
//! 2. Project config (`cabinet.toml` at the project root)
//! 3. Built-in defaults (lowest priority)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CabinetError, CabinetResult};
use crate::suitecloud::{DEPLOY_SUCCESS_PATTERN, IMPORT_SUCCESS_PATTERN};

/// Config file name, looked up at the project root.
pub const CONFIG_FILE: &str = "cabinet.toml";

/// Environment override for the SuiteCloud binary.
pub const BINARY_ENV: &str = "CABINET_SUITECLOUD_BIN";

/// Warning for an unknown config key (typo detection)
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suitecloud: SuiteCloudConfig,
}

/// External CLI settings.
///
/// The success banners are version-sensitive text the CLI prints; pin them
/// here when a SuiteCloud upgrade changes its wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteCloudConfig {
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_import_pattern")]
    pub import_success_pattern: String,

    #[serde(default = "default_deploy_pattern")]
    pub deploy_success_pattern: String,
}

impl Default for SuiteCloudConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            import_success_pattern: default_import_pattern(),
            deploy_success_pattern: default_deploy_pattern(),
        }
    }
}

fn default_binary() -> String {
    "suitecloud".to_string()
}

fn default_import_pattern() -> String {
    IMPORT_SUCCESS_PATTERN.to_string()
}

fn default_deploy_pattern() -> String {
    DEPLOY_SUCCESS_PATTERN.to_string()
}

impl Config {
    /// Load configuration for a project, collecting non-fatal warnings
    /// (e.g. unknown keys). A missing config file yields the defaults.
    pub fn load(project_root: &Path) -> CabinetResult<(Self, Vec<ConfigWarning>)> {
        let path = project_root.join(CONFIG_FILE);

        let (mut config, warnings) = if path.is_file() {
            let content = fs::read_to_string(&path)?;

            let mut unknown_paths: Vec<String> = Vec::new();
            let deserializer = toml::de::Deserializer::new(&content);

            let config: Config = serde_ignored::deserialize(deserializer, |p| {
                unknown_paths.push(p.to_string());
            })
            .map_err(|e| CabinetError::InvalidConfig {
                path: path.clone(),
                message: e.to_string(),
            })?;

            let warnings = unknown_paths
                .into_iter()
                .map(|key| ConfigWarning { key })
                .collect();
            (config, warnings)
        } else {
            (Config::default(), Vec::new())
        };

        if let Ok(binary) = std::env::var(BINARY_ENV) {
            if !binary.is_empty() {
                config.suitecloud.binary = binary;
            }
        }

        Ok((config, warnings))
    }
}
