//! Venv command implementation.
//!
//! The `pyprep venv` command prepares a local project environment: create
//! the virtual environment if needed, upgrade its pip, install the
//! requirements file, and explain how to activate it.

use std::path::{Path, PathBuf};

use crate::cli::args::VenvArgs;
use crate::config::PyprepConfig;
use crate::error::Result;
use crate::python::{InstallMode, PipInstaller, PythonInterpreter, VirtualEnv};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The venv command implementation.
pub struct VenvCommand {
    project_root: PathBuf,
    config: PyprepConfig,
    args: VenvArgs,
}

impl VenvCommand {
    /// Create a new venv command.
    pub fn new(project_root: &Path, config: &PyprepConfig, args: VenvArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }

    fn env_name(&self) -> &str {
        self.args.env_name.as_deref().unwrap_or(&self.config.env_name)
    }

    fn requirements(&self) -> &str {
        self.args
            .requirements
            .as_deref()
            .unwrap_or(&self.config.requirements)
    }

    fn base_python(&self) -> PythonInterpreter {
        PythonInterpreter::new(self.args.python.as_deref().unwrap_or(&self.config.python))
    }

    fn upgrade_pip(&self) -> bool {
        self.config.upgrade_pip && !self.args.no_upgrade_pip
    }
}

impl Command for VenvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env_name = self.env_name();
        let venv = VirtualEnv::new(self.project_root.join(env_name));

        ui.show_header("Preparing local virtual environment");

        if venv.exists() {
            ui.skipped(&format!("Virtual environment {} already exists", env_name));
        } else {
            let base = self.base_python();
            ui.show_command(&venv.create_command(&base).to_string());
            venv.create(&base)?;
            ui.success(&format!("Created virtual environment {}", env_name));
        }

        let python = venv.interpreter()?;
        ui.detail(&format!("Interpreter: {}", python.program().display()));
        let pip = PipInstaller::new(python, InstallMode::Each).in_dir(self.project_root.clone());

        if self.upgrade_pip() {
            ui.show_command(&pip.upgrade_pip_command().to_string());
            pip.upgrade_pip()?;
        }

        let requirements = self.requirements();
        let requirements_path = self.project_root.join(requirements);
        if requirements_path.is_file() {
            ui.show_command(&pip.install_file_command(&requirements_path).to_string());
            pip.install_file(&requirements_path)?;
            ui.success(&format!("Installed dependencies from {}", requirements));
        } else {
            ui.warning(&format!(
                "{} not found, skipping dependency installation",
                requirements
            ));
        }

        ui.message("");
        ui.message("Activate the environment with:");
        for line in venv.activation_instructions(env_name) {
            ui.show_hint(&line);
        }

        Ok(CommandResult::success())
    }
}
