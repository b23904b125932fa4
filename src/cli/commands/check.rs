//! Check command implementation.
//!
//! The `pyprep check` command reports what `sync` would install without
//! touching the environment. It exits 1 when anything is out of date, so it
//! can gate CI jobs and notebook cells.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::PyprepConfig;
use crate::error::Result;
use crate::manifest::ManifestSource;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::sync::{reconcile_manifest, target_python};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config: PyprepConfig,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config: &PyprepConfig, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let python = target_python(self.args.python.as_deref(), &self.config);
        let manifest = self
            .args
            .manifest
            .as_deref()
            .unwrap_or(self.config.hosted_manifest());

        let source = ManifestSource::parse(manifest, &self.project_root);

        ui.show_header("Checking Python environment");
        let reconciliation = reconcile_manifest(&self.config, &source, &python, ui)?;

        let pending = reconciliation.to_install().len();
        if pending == 0 {
            ui.success("Environment satisfies the manifest");
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!(
                "{} declaration(s) would be installed; run `pyprep sync`",
                pending
            ));
            Ok(CommandResult::failure(1))
        }
    }
}
