//! Configuration file discovery and loading.
//!
//! Config files are optional. When present they are layered, later files
//! overriding earlier ones key by key:
//! 1. Project config (`.pyprep/config.yml`)
//! 2. Local overrides (`.pyprep/config.local.yml`)

use crate::config::schema::PyprepConfig;
use crate::error::{PyprepError, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding pyprep's config files.
pub const CONFIG_DIR: &str = ".pyprep";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .pyprep/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .pyprep/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let existing = |name: &str| {
            let path = project_root.join(CONFIG_DIR).join(name);
            path.is_file().then_some(path)
        };

        Self {
            project: existing("config.yml"),
            project_local: existing("config.local.yml"),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(&self.project_local).collect()
    }
}

/// Load a config file as a raw YAML mapping (for layering).
///
/// An empty file is an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PyprepError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PyprepError::Io(e)
        }
    })?;

    let parse_error = |message: String| PyprepError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    };

    match serde_yaml::from_str::<Value>(&content).map_err(|e| parse_error(e.to_string()))? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(parse_error("expected a mapping at the top level".to_string())),
    }
}

/// Layer `overlay` on top of `base`.
///
/// Keys in the overlay replace keys in the base; a `null` value removes the
/// key so the default applies again.
pub fn layer(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, value) in overlay {
        if value.is_null() {
            base.remove(&key);
        } else {
            base.insert(key, value);
        }
    }
    base
}

/// Load, layer, parse and validate the configuration for a project.
///
/// With `config_override`, only that file is read and it must exist.
/// Without it, missing config files simply mean defaults.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PyprepConfig> {
    let paths: Vec<PathBuf> = match config_override {
        Some(path) => vec![path.to_path_buf()],
        None => ConfigPaths::discover(project_root)
            .all_existing()
            .into_iter()
            .cloned()
            .collect(),
    };

    let mut merged = Mapping::new();
    for path in &paths {
        tracing::debug!("Loading config from {}", path.display());
        merged = layer(merged, load_config_value(path)?);
    }

    let report_path = paths
        .last()
        .cloned()
        .unwrap_or_else(|| project_root.join(CONFIG_DIR).join("config.yml"));

    let config: PyprepConfig =
        serde_yaml::from_value(Value::Mapping(merged)).map_err(|e| {
            PyprepError::ConfigParseError {
                path: report_path,
                message: e.to_string(),
            }
        })?;

    config.validate()?;
    Ok(config)
}
