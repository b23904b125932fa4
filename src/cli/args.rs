//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::environment::RunMode;
use crate::python::InstallMode;

/// pyprep - Prepare a Python environment for a project or a hosted notebook.
#[derive(Debug, Parser)]
#[command(name = "pyprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .pyprep/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Arguments for the default `auto` command
    #[command(flatten)]
    pub auto: AutoArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick local or hosted mode and run it (default if no command specified)
    Auto(AutoArgs),

    /// Create the project virtual environment and install requirements
    Venv(VenvArgs),

    /// Install what the manifest declares but the interpreter lacks
    Sync(SyncArgs),

    /// Report what `sync` would install; exit 1 if anything
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `auto` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AutoArgs {
    /// Force a mode instead of detecting it
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,

    /// Manifest used in hosted mode (path or http(s) URL)
    #[arg(long, env = "PYPREP_MANIFEST")]
    pub manifest: Option<String>,

    /// Python interpreter (base interpreter in local mode)
    #[arg(long, env = "PYPREP_PYTHON")]
    pub python: Option<String>,
}

/// Arguments for the `venv` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VenvArgs {
    /// Virtual environment directory, relative to the project
    #[arg(long)]
    pub env_name: Option<String>,

    /// Requirements file to install into the environment
    #[arg(long)]
    pub requirements: Option<String>,

    /// Base interpreter used to create the environment
    #[arg(long, env = "PYPREP_PYTHON")]
    pub python: Option<String>,

    /// Leave pip at the version venv installed
    #[arg(long)]
    pub no_upgrade_pip: bool,
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SyncArgs {
    /// Requirements manifest (path or http(s) URL)
    #[arg(long, env = "PYPREP_MANIFEST")]
    pub manifest: Option<String>,

    /// Interpreter to inspect and install into
    #[arg(long, env = "PYPREP_PYTHON")]
    pub python: Option<String>,

    /// How selected declarations are passed to pip
    #[arg(long, value_enum)]
    pub install_mode: Option<InstallMode>,

    /// Show what would be installed without installing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Requirements manifest (path or http(s) URL)
    #[arg(long, env = "PYPREP_MANIFEST")]
    pub manifest: Option<String>,

    /// Interpreter to inspect
    #[arg(long, env = "PYPREP_PYTHON")]
    pub python: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
