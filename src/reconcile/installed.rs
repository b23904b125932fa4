//! Installed-package lookup.

use std::collections::HashMap;

use pep508_rs::PackageName;

/// Answers "which version of this distribution is installed?".
///
/// Implementations are read-only snapshots; the reconciler never mutates
/// them.
pub trait InstalledPackages {
    /// Installed version of `name`, or `None` if it is not installed.
    fn installed_version(&self, name: &PackageName) -> Option<&str>;
}

/// Name-to-version snapshot of an environment at check time.
///
/// Names are stored normalized, so `Pillow`, `pillow` and `PILLOW` refer to
/// the same entry.
#[derive(Debug, Clone, Default)]
pub struct InstalledSnapshot {
    packages: HashMap<PackageName, String>,
}

impl InstalledSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(name, version)` pairs.
    ///
    /// The first occurrence of a name wins, matching the interpreter's
    /// import path order. Names that are not valid distribution names are
    /// ignored.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut snapshot = Self::new();
        for (name, version) in pairs {
            snapshot.insert(name.as_ref(), version);
        }
        snapshot
    }

    /// Record an installed distribution unless the name is already present.
    pub fn insert(&mut self, name: &str, version: impl Into<String>) {
        match PackageName::new(name.to_string()) {
            Ok(name) => {
                self.packages.entry(name).or_insert_with(|| version.into());
            }
            Err(e) => tracing::debug!("Ignoring installed distribution '{}': {}", name, e),
        }
    }

    /// Number of distinct installed distributions.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl InstalledPackages for InstalledSnapshot {
    fn installed_version(&self, name: &PackageName) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }
}
