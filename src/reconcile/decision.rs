//! Per-line reconciliation outcomes.

use std::fmt;

/// Why a declaration was selected for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallReason {
    /// VCS, URL, editable, option or include line.
    Passthrough,
    /// The line could not be parsed as a requirement.
    Unparsable { error: String },
    /// No distribution with this name is installed.
    Missing { name: String },
    /// The installed version does not satisfy the specifier.
    VersionMismatch {
        name: String,
        installed: String,
        specifier: String,
    },
}

/// Why a declaration needs no action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The environment marker is false for the target interpreter.
    MarkerNotSatisfied,
    /// The installed version already satisfies the requirement.
    Satisfied { name: String, installed: String },
}

/// The decision taken for one manifest declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Hand the declaration to the installer.
    Install {
        declaration: String,
        reason: InstallReason,
    },
    /// Leave the environment as it is.
    Skip {
        declaration: String,
        reason: SkipReason,
    },
}

impl Decision {
    /// Whether the declaration was selected for installation.
    pub fn is_install(&self) -> bool {
        matches!(self, Decision::Install { .. })
    }

    /// The declaration text this decision applies to.
    pub fn declaration(&self) -> &str {
        match self {
            Decision::Install { declaration, .. } | Decision::Skip { declaration, .. } => {
                declaration
            }
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Install {
                declaration,
                reason,
            } => match reason {
                InstallReason::Passthrough => write!(f, "Add (passthrough): {}", declaration),
                InstallReason::Unparsable { .. } => {
                    write!(f, "Add (not parsable): {}", declaration)
                }
                InstallReason::Missing { .. } => write!(f, "Missing: {}", declaration),
                InstallReason::VersionMismatch {
                    name,
                    installed,
                    specifier,
                } => write!(
                    f,
                    "{} {} does not satisfy '{}', reinstalling: {}",
                    name, installed, specifier, declaration
                ),
            },
            Decision::Skip {
                declaration,
                reason,
            } => match reason {
                SkipReason::MarkerNotSatisfied => {
                    write!(f, "Ignored (marker not satisfied): {}", declaration)
                }
                SkipReason::Satisfied { name, installed } => {
                    write!(f, "{} {} OK", name, installed)
                }
            },
        }
    }
}

/// Ordered decisions for a whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    decisions: Vec<Decision>,
}

impl Reconciliation {
    /// Wrap decisions in manifest order.
    pub fn new(decisions: Vec<Decision>) -> Self {
        Self { decisions }
    }

    /// Every decision, in manifest order.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Declarations selected for installation, in manifest order.
    pub fn to_install(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| d.is_install())
            .map(Decision::declaration)
            .collect()
    }

    /// Owned copy of [`Reconciliation::to_install`].
    pub fn install_list(&self) -> Vec<String> {
        self.to_install().into_iter().map(String::from).collect()
    }

    /// Whether nothing needs to be installed.
    pub fn is_satisfied(&self) -> bool {
        !self.decisions.iter().any(Decision::is_install)
    }
}
