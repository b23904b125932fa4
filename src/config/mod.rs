//! Configuration loading.
//!
//! pyprep works without any config file. A project can pin its choices in
//! `.pyprep/config.yml`, and a developer can override those locally in
//! `.pyprep/config.local.yml`. Command-line flags win over both.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_value, ConfigPaths, CONFIG_DIR};
pub use schema::PyprepConfig;
