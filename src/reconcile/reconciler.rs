//! The requirement reconciler.
//!
//! A single pass over the manifest. Each line is decided on its own, from
//! the line itself, the installed snapshot, and the target marker
//! environment. Earlier lines never influence later ones, and repeated
//! names are not merged.

use std::str::FromStr;

use pep440_rs::{Version, VersionSpecifiers};
use pep508_rs::{MarkerEnvironment, Requirement, VersionOrUrl};

use crate::manifest::{classify, Declaration};

use super::decision::{Decision, InstallReason, Reconciliation, SkipReason};
use super::installed::InstalledPackages;

/// Decides which manifest declarations must be (re)installed.
pub struct Reconciler<'a> {
    installed: &'a dyn InstalledPackages,
    markers: &'a MarkerEnvironment,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over an installed snapshot and marker environment.
    pub fn new(installed: &'a dyn InstalledPackages, markers: &'a MarkerEnvironment) -> Self {
        Self { installed, markers }
    }

    /// Decide every declaration of a manifest.
    ///
    /// Blank and comment lines produce no decision; every other line
    /// produces exactly one.
    pub fn reconcile<I, S>(&self, lines: I) -> Reconciliation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let decisions = lines
            .into_iter()
            .filter_map(|line| classify(line.as_ref()))
            .map(|declaration| self.decide(declaration))
            .inspect(|decision| tracing::debug!("{}", decision))
            .collect();

        Reconciliation::new(decisions)
    }

    /// Decide a single classified declaration.
    pub fn decide(&self, declaration: Declaration) -> Decision {
        match declaration {
            Declaration::Raw(text) => Decision::Install {
                declaration: text,
                reason: InstallReason::Passthrough,
            },
            Declaration::Unparsable { text, error } => Decision::Install {
                declaration: text,
                reason: InstallReason::Unparsable { error },
            },
            Declaration::Parsed { text, requirement } => self.decide_requirement(text, &requirement),
        }
    }

    fn decide_requirement(&self, text: String, requirement: &Requirement) -> Decision {
        if !requirement.evaluate_markers(self.markers, &[]) {
            return Decision::Skip {
                declaration: text,
                reason: SkipReason::MarkerNotSatisfied,
            };
        }

        let name = requirement.name.to_string();
        let Some(installed) = self.installed.installed_version(&requirement.name) else {
            return Decision::Install {
                declaration: text,
                reason: InstallReason::Missing { name },
            };
        };

        let specifiers = match &requirement.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specs)) if !specs.is_empty() => Some(specs),
            _ => None,
        };

        match specifiers {
            Some(specs) if !satisfies(specs, installed) => Decision::Install {
                declaration: text,
                reason: InstallReason::VersionMismatch {
                    name,
                    installed: installed.to_string(),
                    specifier: specs.to_string(),
                },
            },
            _ => Decision::Skip {
                declaration: text,
                reason: SkipReason::Satisfied {
                    name,
                    installed: installed.to_string(),
                },
            },
        }
    }
}

/// Whether an installed version string satisfies a specifier set.
///
/// Pre-release versions are accepted like any other. An installed version
/// that is not valid PEP 440 never satisfies a non-empty specifier set.
pub fn satisfies(specifiers: &VersionSpecifiers, installed: &str) -> bool {
    match Version::from_str(installed.trim()) {
        Ok(version) => specifiers.contains(&version),
        Err(e) => {
            tracing::debug!("Installed version '{}' is not PEP 440: {}", installed, e);
            false
        }
    }
}
