//! Auto command implementation.
//!
//! The default command. Works out whether pyprep is running in a hosted
//! notebook and runs `sync` there, `venv` everywhere else.

use std::path::{Path, PathBuf};

use crate::cli::args::{AutoArgs, SyncArgs, VenvArgs};
use crate::config::PyprepConfig;
use crate::environment::{NotebookDetector, ResolvedMode, RunMode};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::sync::SyncCommand;
use super::venv::VenvCommand;

/// The auto command implementation.
pub struct AutoCommand {
    project_root: PathBuf,
    config: PyprepConfig,
    args: AutoArgs,
}

impl AutoCommand {
    /// Create a new auto command.
    pub fn new(project_root: &Path, config: &PyprepConfig, args: AutoArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }

    /// Resolve the mode against the process environment.
    pub fn resolve_mode(&self) -> ResolvedMode {
        ResolvedMode::resolve(self.args.mode, self.config.mode, &NotebookDetector::new())
    }

    fn run_mode(
        &self,
        resolved: &ResolvedMode,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        tracing::debug!("Running in {:?} mode ({})", resolved.mode, resolved.source);
        ui.detail(&format!("Mode: {:?} ({})", resolved.mode, resolved.source));

        match resolved.mode {
            RunMode::Hosted => {
                let args = SyncArgs {
                    manifest: self.args.manifest.clone(),
                    python: self.args.python.clone(),
                    ..Default::default()
                };
                SyncCommand::new(&self.project_root, &self.config, args).execute(ui)
            }
            RunMode::Local | RunMode::Auto => {
                let args = VenvArgs {
                    python: self.args.python.clone(),
                    ..Default::default()
                };
                VenvCommand::new(&self.project_root, &self.config, args).execute(ui)
            }
        }
    }
}

impl Command for AutoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = self.resolve_mode();
        self.run_mode(&resolved, ui)
    }
}
