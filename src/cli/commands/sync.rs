//! Sync command implementation.
//!
//! The `pyprep sync` command reconciles the target interpreter against a
//! requirements manifest and installs only what is missing or mismatched.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::cli::args::SyncArgs;
use crate::config::PyprepConfig;
use crate::error::Result;
use crate::manifest::{ManifestFetcher, ManifestSource};
use crate::python::{Installer, PipInstaller, PythonInterpreter};
use crate::reconcile::{Decision, Reconciler, Reconciliation, SkipReason};
use crate::shell::CommandLine;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The sync command implementation.
pub struct SyncCommand {
    project_root: PathBuf,
    config: PyprepConfig,
    args: SyncArgs,
}

impl SyncCommand {
    /// Create a new sync command.
    pub fn new(project_root: &Path, config: &PyprepConfig, args: SyncArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }
}

impl Command for SyncCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let python = target_python(self.args.python.as_deref(), &self.config);
        let manifest = self
            .args
            .manifest
            .as_deref()
            .unwrap_or(self.config.hosted_manifest());
        let mode = self.args.install_mode.unwrap_or(self.config.install_mode);

        let source = ManifestSource::parse(manifest, &self.project_root);

        ui.show_header("Syncing Python environment");
        let reconciliation = reconcile_manifest(&self.config, &source, &python, ui)?;

        let install_list = reconciliation.install_list();
        if install_list.is_empty() {
            ui.success("Environment already satisfies the manifest");
            return Ok(CommandResult::success());
        }

        if self.args.dry_run {
            ui.message(&format!(
                "Dry run: {} declaration(s) would be installed",
                install_list.len()
            ));
            return Ok(CommandResult::success());
        }

        tracing::debug!(
            "Installing {} declaration(s) with {:?} mode",
            install_list.len(),
            mode
        );
        let working_dir = source.base_dir().unwrap_or(self.project_root.as_path());
        {
            let echo_ui = RefCell::new(&mut *ui);
            let echo = |command: &CommandLine| {
                echo_ui.borrow_mut().show_command(&command.to_string());
            };
            PipInstaller::new(python, mode)
                .in_dir(working_dir)
                .with_observer(&echo)
                .install(&install_list)?;
        }

        ui.success(&format!("Installed {} declaration(s)", install_list.len()));
        Ok(CommandResult::success())
    }
}

/// Interpreter chosen by flag or environment, falling back to config.
pub(super) fn target_python(flag: Option<&str>, config: &PyprepConfig) -> PythonInterpreter {
    PythonInterpreter::new(flag.unwrap_or(&config.python))
}

/// Probe `python`, load `source`, reconcile, and report each decision.
pub(super) fn reconcile_manifest(
    config: &PyprepConfig,
    source: &ManifestSource,
    python: &PythonInterpreter,
    ui: &mut dyn UserInterface,
) -> Result<Reconciliation> {
    let mut spinner = ui.start_spinner("Inspecting Python environment...");
    let snapshot = match python.probe() {
        Ok(snapshot) => {
            spinner.finish_success(&format!("Python {}", snapshot.python_version));
            snapshot
        }
        Err(e) => {
            spinner.finish_error("Could not inspect Python environment");
            return Err(e);
        }
    };
    ui.detail(&format!("Interpreter: {}", snapshot.executable.display()));
    ui.detail(&format!("Installed distributions: {}", snapshot.installed.len()));

    let fetcher = ManifestFetcher::new(config.timeout())?;
    let mut spinner = ui.start_spinner(&format!("Reading {}...", source));
    let lines = match fetcher.load(source) {
        Ok(lines) => {
            spinner.finish_success(&format!("Read {}", source));
            lines
        }
        Err(e) => {
            spinner.finish_error(&format!("Could not read {}", source));
            return Err(e);
        }
    };

    let reconciliation =
        Reconciler::new(&snapshot.installed, &snapshot.markers).reconcile(lines);
    for decision in reconciliation.decisions() {
        report_decision(ui, decision);
    }
    Ok(reconciliation)
}

fn report_decision(ui: &mut dyn UserInterface, decision: &Decision) {
    let line = decision.to_string();
    match decision {
        Decision::Install { .. } => ui.pending(&line),
        Decision::Skip {
            reason: SkipReason::Satisfied { .. },
            ..
        } => ui.success(&line),
        Decision::Skip {
            reason: SkipReason::MarkerNotSatisfied,
            ..
        } => ui.skipped(&line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::InstallReason;
    use crate::ui::MockUI;

    #[test]
    fn flag_python_wins_over_config() {
        let config = PyprepConfig {
            python: "python3.10".to_string(),
            ..Default::default()
        };
        assert_eq!(
            target_python(Some("/opt/py/bin/python"), &config).program(),
            Path::new("/opt/py/bin/python")
        );
        assert_eq!(
            target_python(None, &config).program(),
            Path::new("python3.10")
        );
    }

    #[test]
    fn decisions_are_reported_by_kind() {
        let mut ui = MockUI::new();
        report_decision(
            &mut ui,
            &Decision::Install {
                declaration: "torch".to_string(),
                reason: InstallReason::Missing {
                    name: "torch".to_string(),
                },
            },
        );
        report_decision(
            &mut ui,
            &Decision::Skip {
                declaration: "numpy==1.26.0".to_string(),
                reason: SkipReason::Satisfied {
                    name: "numpy".to_string(),
                    installed: "1.26.0".to_string(),
                },
            },
        );
        report_decision(
            &mut ui,
            &Decision::Skip {
                declaration: "pywin32; sys_platform == 'win32'".to_string(),
                reason: SkipReason::MarkerNotSatisfied,
            },
        );

        assert!(ui.has_pending("Missing: torch"));
        assert!(ui.has_success("numpy 1.26.0 OK"));
        assert_eq!(ui.skipped_lines().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn missing_interpreter_fails_before_reading_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let python = PythonInterpreter::new("/nonexistent/pyprep-python");

        let source = ManifestSource::parse("requirements.txt", temp.path());

        let result = reconcile_manifest(&PyprepConfig::default(), &source, &python, &mut ui);

        assert!(matches!(
            result,
            Err(crate::error::PyprepError::PythonNotFound { .. })
        ));
        assert_eq!(ui.spinners().len(), 1);
    }
}
