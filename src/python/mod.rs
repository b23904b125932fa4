//! Python environments: interpreters, virtual environments, and pip.
//!
//! - [`interpreter`] - Probing an interpreter for markers and installed packages
//! - [`venv`] - Virtual environment layout and creation
//! - [`pip`] - Installing declarations with pip

pub mod interpreter;
pub mod pip;
pub mod venv;

pub use interpreter::{EnvironmentSnapshot, MarkerValues, PythonInterpreter};
pub use pip::{is_install_target, InstallMode, Installer, PipInstaller};
pub use venv::{PlatformFamily, VirtualEnv};

/// Interpreter used when nothing else is configured.
pub fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}
