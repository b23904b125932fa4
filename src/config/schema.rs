//! Configuration schema.
//!
//! Maps `.pyprep/config.yml`. Every key is optional; missing keys take
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::environment::RunMode;
use crate::error::{PyprepError, Result};
use crate::python::{default_python, InstallMode};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PyprepConfig {
    /// `auto`, `local` or `hosted`.
    pub mode: RunMode,

    /// Virtual environment directory, relative to the project root.
    pub env_name: String,

    /// Requirements file installed into the local virtual environment.
    pub requirements: String,

    /// Manifest reconciled in hosted mode: a path or an http(s) URL.
    /// Defaults to `requirements`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Base interpreter (local mode) or target interpreter (hosted mode).
    pub python: String,

    /// Upgrade pip right after creating the virtual environment.
    pub upgrade_pip: bool,

    /// How selected declarations are passed to pip.
    pub install_mode: InstallMode,

    /// Timeout for fetching a remote manifest.
    pub timeout_secs: u64,
}

impl Default for PyprepConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Auto,
            env_name: ".env".to_string(),
            requirements: "requirements.txt".to_string(),
            manifest: None,
            python: default_python().to_string(),
            upgrade_pip: true,
            install_mode: InstallMode::Each,
            timeout_secs: 30,
        }
    }
}

impl PyprepConfig {
    /// Manifest location used in hosted mode.
    pub fn hosted_manifest(&self) -> &str {
        self.manifest.as_deref().unwrap_or(&self.requirements)
    }

    /// Remote fetch timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(PyprepError::ConfigValidationError {
                message: message.to_string(),
            })
        };

        if self.env_name.trim().is_empty() {
            return invalid("env_name must not be empty");
        }
        if self.requirements.trim().is_empty() {
            return invalid("requirements must not be empty");
        }
        if self.python.trim().is_empty() {
            return invalid("python must not be empty");
        }
        if self.manifest.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return invalid("manifest must not be empty when set");
        }
        if self.timeout_secs == 0 {
            return invalid("timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
