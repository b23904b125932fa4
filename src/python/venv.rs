//! Project virtual environments.

use std::path::PathBuf;

use crate::error::{PyprepError, Result};
use crate::shell::{execute_checked, CommandLine, CommandOptions};

use super::interpreter::PythonInterpreter;

/// Operating system family, for interpreter paths and activation hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

impl PlatformFamily {
    /// The family this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else {
            PlatformFamily::Unix
        }
    }
}

/// A virtual environment rooted at a directory.
#[derive(Debug, Clone)]
pub struct VirtualEnv {
    root: PathBuf,
    platform: PlatformFamily,
}

impl VirtualEnv {
    /// A virtual environment at `root` for the current platform.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::for_platform(root, PlatformFamily::current())
    }

    /// A virtual environment at `root` laid out for `platform`.
    pub fn for_platform(root: impl Into<PathBuf>, platform: PlatformFamily) -> Self {
        Self {
            root: root.into(),
            platform,
        }
    }

    /// Whether the environment directory already exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Path of the environment's interpreter.
    pub fn python_path(&self) -> PathBuf {
        match self.platform {
            PlatformFamily::Windows => self.root.join("Scripts").join("python.exe"),
            PlatformFamily::Unix => self.root.join("bin").join("python"),
        }
    }

    /// The environment's interpreter, if it is present.
    pub fn interpreter(&self) -> Result<PythonInterpreter> {
        let path = self.python_path();
        if path.is_file() {
            Ok(PythonInterpreter::new(path))
        } else {
            Err(PyprepError::PythonNotFound { path })
        }
    }

    /// Command that creates this environment with `base`.
    pub fn create_command(&self, base: &PythonInterpreter) -> CommandLine {
        base.module("venv").arg(&self.root)
    }

    /// Create the environment with `base`.
    pub fn create(&self, base: &PythonInterpreter) -> Result<()> {
        tracing::debug!("Creating virtual environment at {}", self.root.display());
        execute_checked(&self.create_command(base), &CommandOptions::default())?;
        Ok(())
    }

    /// Shell instructions for activating the environment.
    ///
    /// `display_name` is how the environment is referred to in the
    /// instructions, normally its path relative to the project.
    pub fn activation_instructions(&self, display_name: &str) -> Vec<String> {
        match self.platform {
            PlatformFamily::Windows => vec![
                format!("PowerShell : .\\{}\\Scripts\\Activate.ps1", display_name),
                format!("CMD        : {}\\Scripts\\activate.bat", display_name),
            ],
            PlatformFamily::Unix => vec![format!("Bash/zsh   : source {}/bin/activate", display_name)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unix_layout() {
        let venv = VirtualEnv::for_platform("/project/.env", PlatformFamily::Unix);
        assert_eq!(venv.python_path(), PathBuf::from("/project/.env/bin/python"));
    }

    #[test]
    fn windows_layout() {
        let venv = VirtualEnv::for_platform("project/.env", PlatformFamily::Windows);
        assert_eq!(
            venv.python_path(),
            PathBuf::from("project/.env")
                .join("Scripts")
                .join("python.exe")
        );
    }

    #[test]
    fn unix_activation_uses_source() {
        let venv = VirtualEnv::for_platform(".env", PlatformFamily::Unix);
        let lines = venv.activation_instructions(".env");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("source .env/bin/activate"));
    }

    #[test]
    fn windows_activation_covers_powershell_and_cmd() {
        let venv = VirtualEnv::for_platform(".env", PlatformFamily::Windows);
        let lines = venv.activation_instructions(".env");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r".\.env\Scripts\Activate.ps1"));
        assert!(lines[1].contains(r".env\Scripts\activate.bat"));
    }

    #[test]
    fn create_command_uses_venv_module() {
        let venv = VirtualEnv::for_platform(".env", PlatformFamily::Unix);
        let cmd = venv.create_command(&PythonInterpreter::new("python3"));
        assert_eq!(cmd.to_string(), "python3 -m venv .env");
    }

    #[test]
    fn interpreter_missing_is_python_not_found() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::for_platform(temp.path().join(".env"), PlatformFamily::Unix);
        assert!(!venv.exists());
        let err = venv.interpreter().unwrap_err();
        assert!(matches!(err, PyprepError::PythonNotFound { .. }));
    }

    #[test]
    fn interpreter_found_when_present() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::for_platform(temp.path().join(".env"), PlatformFamily::Unix);
        fs::create_dir_all(temp.path().join(".env/bin")).unwrap();
        fs::write(temp.path().join(".env/bin/python"), "").unwrap();

        assert!(venv.exists());
        let python = venv.interpreter().unwrap();
        assert_eq!(python.program(), venv.python_path());
    }
}
