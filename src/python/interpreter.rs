//! Python interpreter inspection.
//!
//! pyprep never guesses what an interpreter looks like. It runs a small
//! embedded script under the target interpreter that reports the PEP 508
//! marker values and every installed distribution as JSON.

use std::path::{Path, PathBuf};

use pep508_rs::{MarkerEnvironment, MarkerEnvironmentBuilder};
use serde::Deserialize;

use crate::error::{PyprepError, Result};
use crate::reconcile::InstalledSnapshot;
use crate::shell::{execute, CommandLine, CommandOptions};

const PROBE_SCRIPT: &str = include_str!("probe.py");

/// A Python interpreter, identified by the program used to launch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInterpreter {
    program: PathBuf,
}

impl PythonInterpreter {
    /// Wrap an interpreter path or a program name looked up on PATH.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program used to launch the interpreter.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `<python> -m <module>`, ready for more arguments.
    pub fn module(&self, module: &str) -> CommandLine {
        CommandLine::new(&self.program).args(["-m", module])
    }

    /// Inspect the interpreter's marker environment and installed packages.
    pub fn probe(&self) -> Result<EnvironmentSnapshot> {
        let command = CommandLine::new(&self.program).args(["-c", PROBE_SCRIPT]);
        let result = match execute(&command, &CommandOptions::captured()) {
            Ok(result) => result,
            Err(PyprepError::CommandFailed { code: None, .. }) => {
                return Err(PyprepError::PythonNotFound {
                    path: self.program.clone(),
                })
            }
            Err(e) => return Err(e),
        };

        if !result.success {
            return Err(PyprepError::ProbeFailed {
                message: format!(
                    "{} exited with code {:?}: {}",
                    self.program.display(),
                    result.exit_code,
                    result.stderr.trim()
                ),
            });
        }

        EnvironmentSnapshot::from_json(&result.stdout)
    }
}

/// Raw report printed by the probe script.
#[derive(Debug, Deserialize)]
struct ProbeReport {
    executable: PathBuf,
    markers: MarkerValues,
    packages: Vec<(Option<String>, Option<String>)>,
}

/// PEP 508 environment marker values as reported by the interpreter.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerValues {
    pub implementation_name: String,
    pub implementation_version: String,
    pub os_name: String,
    pub platform_machine: String,
    pub platform_python_implementation: String,
    pub platform_release: String,
    pub platform_system: String,
    pub platform_version: String,
    pub python_full_version: String,
    pub python_version: String,
    pub sys_platform: String,
}

impl MarkerValues {
    /// Build a marker environment for requirement evaluation.
    pub fn to_marker_environment(&self) -> Result<MarkerEnvironment> {
        MarkerEnvironment::try_from(MarkerEnvironmentBuilder {
            implementation_name: &self.implementation_name,
            implementation_version: &self.implementation_version,
            os_name: &self.os_name,
            platform_machine: &self.platform_machine,
            platform_python_implementation: &self.platform_python_implementation,
            platform_release: &self.platform_release,
            platform_system: &self.platform_system,
            platform_version: &self.platform_version,
            python_full_version: &self.python_full_version,
            python_version: &self.python_version,
            sys_platform: &self.sys_platform,
        })
        .map_err(|e| PyprepError::ProbeFailed {
            message: format!("invalid marker environment: {}", e),
        })
    }
}

/// What an interpreter looked like at check time.
#[derive(Debug, Clone)]
pub struct EnvironmentSnapshot {
    /// `sys.executable` of the probed interpreter.
    pub executable: PathBuf,
    /// Full Python version, e.g. `3.11.8`.
    pub python_version: String,
    /// Marker environment for evaluating requirement markers.
    pub markers: MarkerEnvironment,
    /// Installed distributions.
    pub installed: InstalledSnapshot,
}

impl EnvironmentSnapshot {
    /// Parse the probe script's JSON report.
    pub fn from_json(json: &str) -> Result<Self> {
        let report: ProbeReport =
            serde_json::from_str(json.trim()).map_err(|e| PyprepError::ProbeFailed {
                message: format!("unexpected interpreter report: {}", e),
            })?;

        let markers = report.markers.to_marker_environment()?;
        let installed = InstalledSnapshot::from_pairs(
            report
                .packages
                .into_iter()
                .filter_map(|(name, version)| Some((name?, version?))),
        );

        tracing::debug!(
            "Probed {} (Python {}): {} installed distributions",
            report.executable.display(),
            report.markers.python_full_version,
            installed.len()
        );

        Ok(Self {
            executable: report.executable,
            python_version: report.markers.python_full_version,
            markers,
            installed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::InstalledPackages;
    use pep508_rs::PackageName;

    const REPORT: &str = r##"{
        "executable": "/usr/bin/python3",
        "markers": {
            "implementation_name": "cpython",
            "implementation_version": "3.11.8",
            "os_name": "posix",
            "platform_machine": "x86_64",
            "platform_python_implementation": "CPython",
            "platform_release": "6.1.58+",
            "platform_system": "Linux",
            "platform_version": "#1 SMP PREEMPT_DYNAMIC",
            "python_full_version": "3.11.8",
            "python_version": "3.11",
            "sys_platform": "linux"
        },
        "packages": [["numpy", "1.26.4"], ["Pillow", "10.2.0"], ["numpy", "1.24.0"]]
    }"##;

    #[test]
    fn parses_probe_report() {
        let snapshot = EnvironmentSnapshot::from_json(REPORT).unwrap();
        assert_eq!(snapshot.executable, PathBuf::from("/usr/bin/python3"));
        assert_eq!(snapshot.python_version, "3.11.8");
        assert_eq!(snapshot.installed.len(), 2);

        let numpy = PackageName::new("numpy".to_string()).unwrap();
        assert_eq!(snapshot.installed.installed_version(&numpy), Some("1.26.4"));
    }

    #[test]
    fn distributions_without_name_or_version_are_ignored() {
        let report = REPORT.replace(
            r#"["numpy", "1.24.0"]"#,
            r#"["broken", null], [null, "1.0"]"#,
        );
        let snapshot = EnvironmentSnapshot::from_json(&report).unwrap();
        assert_eq!(snapshot.installed.len(), 2);

        let broken = PackageName::new("broken".to_string()).unwrap();
        assert_eq!(snapshot.installed.installed_version(&broken), None);
    }

    #[test]
    fn markers_are_usable_for_evaluation() {
        let snapshot = EnvironmentSnapshot::from_json(REPORT).unwrap();
        let req: pep508_rs::Requirement = "pywin32; sys_platform == 'win32'".parse().unwrap();
        assert!(!req.evaluate_markers(&snapshot.markers, &[]));
        let req: pep508_rs::Requirement = "tomli; python_version < '3.12'".parse().unwrap();
        assert!(req.evaluate_markers(&snapshot.markers, &[]));
    }

    #[test]
    fn malformed_report_is_probe_failure() {
        let err = EnvironmentSnapshot::from_json("Traceback (most recent call last)").unwrap_err();
        assert!(matches!(err, PyprepError::ProbeFailed { .. }));
    }

    #[test]
    fn invalid_python_version_is_probe_failure() {
        let report = REPORT.replace(r#""python_version": "3.11""#, r#""python_version": "eleven""#);
        let err = EnvironmentSnapshot::from_json(&report).unwrap_err();
        assert!(matches!(err, PyprepError::ProbeFailed { .. }));
    }

    #[test]
    fn module_command_line() {
        let python = PythonInterpreter::new("/opt/py/bin/python");
        let cmd = python.module("pip").arg("--version");
        assert_eq!(cmd.to_string(), "/opt/py/bin/python -m pip --version");
    }

    #[test]
    fn missing_interpreter_is_python_not_found() {
        let python = PythonInterpreter::new("/nonexistent/pyprep/python");
        let err = python.probe().unwrap_err();
        assert!(matches!(err, PyprepError::PythonNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_interpreter_is_probe_failure() {
        let python = PythonInterpreter::new("false");
        let err = python.probe().unwrap_err();
        assert!(matches!(err, PyprepError::ProbeFailed { .. }));
    }
}
