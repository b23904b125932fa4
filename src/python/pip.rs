//! Package installation through pip.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shell::{execute_checked, CommandLine, CommandOptions};

use super::interpreter::PythonInterpreter;

/// How selected declarations are handed to pip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// One `pip install` per declaration.
    #[default]
    Each,
    /// A single `pip install -r` over a temporary requirements file.
    Batch,
}

/// Installs declarations into an environment.
pub trait Installer {
    /// Install every declaration, stopping at the first failure.
    fn install(&self, declarations: &[String]) -> Result<()>;
}

/// Called with each command line just before it runs.
pub type CommandObserver<'a> = &'a dyn Fn(&CommandLine);

/// Whether an option line names something to install.
///
/// `-e`/`--editable` and `-r`/`--requirement` install on their own. Every
/// other option (`--extra-index-url`, `-c`, `--trusted-host`, ...) only
/// changes how the remaining declarations are resolved.
pub fn is_install_target(declaration: &str) -> bool {
    let Some(flag) = declaration.split_whitespace().next() else {
        return false;
    };
    if !flag.starts_with('-') {
        return true;
    }
    if let Some(long) = flag.strip_prefix("--") {
        let name = long.split('=').next().unwrap_or(long);
        return name == "editable" || name == "requirement";
    }
    flag.starts_with("-e") || flag.starts_with("-r")
}

/// Runs `python -m pip install`.
pub struct PipInstaller<'a> {
    python: PythonInterpreter,
    mode: InstallMode,
    working_dir: Option<PathBuf>,
    observer: Option<CommandObserver<'a>>,
}

impl<'a> PipInstaller<'a> {
    /// Create an installer for `python`.
    pub fn new(python: PythonInterpreter, mode: InstallMode) -> Self {
        Self {
            python,
            mode,
            working_dir: None,
            observer: None,
        }
    }

    /// Run pip from `dir`, so relative paths in declarations resolve there.
    ///
    /// In batch mode the temporary requirements file is also written to
    /// `dir`, which is where pip looks for nested `-r` and `-c` files.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Report each command line before running it.
    pub fn with_observer(mut self, observer: CommandObserver<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// `pip install` for one declaration, preceded by shared `options`.
    ///
    /// Option forms such as `-e ./pkg` are split on whitespace so pip sees
    /// the flag and its value separately. Anything else is a single
    /// argument, markers included.
    pub fn install_command(&self, options: &[String], declaration: &str) -> CommandLine {
        let command = self.pip_install().args(options);
        if declaration.starts_with('-') {
            command.args(declaration.split_whitespace())
        } else {
            command.arg(declaration)
        }
    }

    /// `pip install -r <file>`.
    pub fn install_file_command(&self, requirements: &Path) -> CommandLine {
        self.pip_install().arg("-r").arg(requirements)
    }

    /// `pip install --upgrade pip`.
    pub fn upgrade_pip_command(&self) -> CommandLine {
        self.pip_install().args(["--upgrade", "pip"])
    }

    /// Upgrade pip itself.
    pub fn upgrade_pip(&self) -> Result<()> {
        self.run(&self.upgrade_pip_command())
    }

    /// Install everything listed in a requirements file.
    pub fn install_file(&self, requirements: &Path) -> Result<()> {
        self.run(&self.install_file_command(requirements))
    }

    fn pip_install(&self) -> CommandLine {
        self.python.module("pip").arg("install")
    }

    fn run(&self, command: &CommandLine) -> Result<()> {
        if let Some(observer) = self.observer {
            observer(command);
        }
        let options = CommandOptions {
            cwd: self.working_dir.clone(),
            ..Default::default()
        };
        execute_checked(command, &options)?;
        Ok(())
    }

    fn install_each(&self, declarations: &[String]) -> Result<()> {
        let (targets, options): (Vec<&String>, Vec<&String>) = declarations
            .iter()
            .partition(|declaration| is_install_target(declaration));
        let options: Vec<String> = options
            .into_iter()
            .flat_map(|option| option.split_whitespace())
            .map(String::from)
            .collect();

        if targets.is_empty() {
            tracing::debug!("Only installer options selected, nothing to install");
            return Ok(());
        }

        for target in targets {
            self.run(&self.install_command(&options, target))?;
        }
        Ok(())
    }

    fn install_batch(&self, declarations: &[String]) -> Result<()> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(".pyprep-").suffix(".txt");
        let mut file = match &self.working_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        for declaration in declarations {
            writeln!(file, "{}", declaration)?;
        }
        file.flush()?;

        self.install_file(file.path())
    }
}

impl Installer for PipInstaller<'_> {
    fn install(&self, declarations: &[String]) -> Result<()> {
        if declarations.is_empty() {
            return Ok(());
        }

        match self.mode {
            InstallMode::Each => self.install_each(declarations),
            InstallMode::Batch => self.install_batch(declarations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PyprepError;
    use std::cell::RefCell;

    fn installer(mode: InstallMode) -> PipInstaller<'static> {
        PipInstaller::new(PythonInterpreter::new("python3"), mode)
    }

    #[test]
    fn install_command_splits_options() {
        let cmd = installer(InstallMode::Each).install_command(&[], "-e ./tools");
        assert_eq!(cmd.to_string(), "python3 -m pip install -e ./tools");
        assert_eq!(cmd.arguments().len(), 5);
    }

    #[test]
    fn install_command_keeps_specifier_intact() {
        let cmd = installer(InstallMode::Each).install_command(&[], "requests>=2.31,<3");
        assert_eq!(cmd.to_string(), "python3 -m pip install requests>=2.31,<3");
    }

    #[test]
    fn install_command_keeps_marker_in_one_argument() {
        let cmd = installer(InstallMode::Each)
            .install_command(&[], "requests>=2.31,<3; python_version >= \"3.8\"");
        assert_eq!(cmd.arguments().len(), 4);
        assert_eq!(
            cmd.arguments()[3],
            "requests>=2.31,<3; python_version >= \"3.8\""
        );
    }

    #[test]
    fn install_command_puts_shared_options_first() {
        let options = vec![
            "--extra-index-url".to_string(),
            "https://example.com/simple".to_string(),
        ];
        let cmd = installer(InstallMode::Each).install_command(&options, "torch");
        assert_eq!(
            cmd.to_string(),
            "python3 -m pip install --extra-index-url https://example.com/simple torch"
        );
    }

    #[test]
    fn install_targets_are_recognized() {
        assert!(is_install_target("numpy==1.26.0"));
        assert!(is_install_target("-e ./tools"));
        assert!(is_install_target("--editable=./tools"));
        assert!(is_install_target("-r base.txt"));
        assert!(is_install_target("--requirement base.txt"));
        assert!(!is_install_target("--extra-index-url https://example.com/simple"));
        assert!(!is_install_target("-i https://example.com/simple"));
        assert!(!is_install_target("-c constraints.txt"));
        assert!(!is_install_target("--trusted-host example.com"));
        assert!(!is_install_target("--pre"));
    }

    #[cfg(unix)]
    #[test]
    fn each_mode_applies_options_to_every_target() {
        let seen = RefCell::new(Vec::new());
        let observer = |cmd: &CommandLine| seen.borrow_mut().push(cmd.to_string());
        let pip = PipInstaller::new(PythonInterpreter::new("true"), InstallMode::Each)
            .with_observer(&observer);

        pip.install(&[
            "--extra-index-url https://example.com/simple".to_string(),
            "torch".to_string(),
            "-e ./tools".to_string(),
        ])
        .unwrap();

        assert_eq!(
            *seen.borrow(),
            [
                "true -m pip install --extra-index-url https://example.com/simple torch",
                "true -m pip install --extra-index-url https://example.com/simple -e ./tools",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn each_mode_with_only_options_runs_nothing() {
        let seen = RefCell::new(Vec::new());
        let observer = |cmd: &CommandLine| seen.borrow_mut().push(cmd.to_string());
        let pip = PipInstaller::new(PythonInterpreter::new("false"), InstallMode::Each)
            .with_observer(&observer);

        pip.install(&["--extra-index-url https://example.com/simple".to_string()])
            .unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn batch_file_is_written_in_working_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let seen = RefCell::new(Vec::new());
        let observer = |cmd: &CommandLine| seen.borrow_mut().push(cmd.arguments().to_vec());
        let pip = PipInstaller::new(PythonInterpreter::new("true"), InstallMode::Batch)
            .in_dir(temp.path())
            .with_observer(&observer);

        pip.install(&["-r base.txt".to_string()]).unwrap();

        let args = seen.borrow();
        let file = Path::new(&args[0][4]);
        assert_eq!(file.parent(), Some(temp.path()));
    }

    #[test]
    fn upgrade_pip_command() {
        let cmd = installer(InstallMode::Each).upgrade_pip_command();
        assert_eq!(cmd.to_string(), "python3 -m pip install --upgrade pip");
    }

    #[test]
    fn install_file_command() {
        let cmd = installer(InstallMode::Batch).install_file_command(Path::new("reqs.txt"));
        assert_eq!(cmd.to_string(), "python3 -m pip install -r reqs.txt");
    }

    #[test]
    fn empty_install_list_runs_nothing() {
        let seen = RefCell::new(Vec::new());
        let observer = |cmd: &CommandLine| seen.borrow_mut().push(cmd.to_string());
        let pip = PipInstaller::new(PythonInterpreter::new("python3"), InstallMode::Each)
            .with_observer(&observer);

        pip.install(&[]).unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn install_mode_deserializes_lowercase() {
        let mode: InstallMode = serde_yaml::from_str("batch").unwrap();
        assert_eq!(mode, InstallMode::Batch);
        assert_eq!(InstallMode::default(), InstallMode::Each);
    }

    #[cfg(unix)]
    #[test]
    fn each_mode_stops_at_first_failure() {
        let seen = RefCell::new(Vec::new());
        let observer = |cmd: &CommandLine| seen.borrow_mut().push(cmd.to_string());
        let pip = PipInstaller::new(PythonInterpreter::new("false"), InstallMode::Each)
            .with_observer(&observer);

        let err = pip
            .install(&["numpy".to_string(), "scipy".to_string()])
            .unwrap_err();
        assert!(matches!(err, PyprepError::CommandFailed { .. }));
        assert_eq!(seen.borrow().len(), 1);
    }
}
