//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, PyprepConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config: PyprepConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root and configuration.
    pub fn new(project_root: PathBuf, config: PyprepConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    /// Load the project's configuration and create a dispatcher.
    pub fn load(project_root: PathBuf, config_override: Option<&Path>) -> Result<Self> {
        let config = load_config(&project_root, config_override)?;
        Ok(Self::new(project_root, config))
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &PyprepConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let config = &self.config;

        match &cli.command {
            Some(Commands::Auto(args)) => {
                super::auto::AutoCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Venv(args)) => {
                super::venv::VenvCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Sync(args)) => {
                super::sync::SyncCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(root, config, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            // Default to auto, with whatever auto flags were given at the top level
            None => super::auto::AutoCommand::new(root, config, cli.auto.clone()).execute(ui),
        }
    }
}
