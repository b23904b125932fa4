//! Requirement reconciliation.
//!
//! Given a requirements manifest and a snapshot of what is installed,
//! work out which declarations still need to be installed.
//!
//! # Modules
//!
//! - [`reconciler`] - The single-pass decision pipeline
//! - [`decision`] - Per-line outcomes and the ordered result
//! - [`installed`] - Installed-package lookup
//!
//! # Example
//!
//! ```
//! use pep508_rs::{MarkerEnvironment, MarkerEnvironmentBuilder};
//! use pyprep::reconcile::{InstalledSnapshot, Reconciler};
//!
//! let markers = MarkerEnvironment::try_from(MarkerEnvironmentBuilder {
//!     implementation_name: "cpython",
//!     implementation_version: "3.11.8",
//!     os_name: "posix",
//!     platform_machine: "x86_64",
//!     platform_python_implementation: "CPython",
//!     platform_release: "",
//!     platform_system: "Linux",
//!     platform_version: "",
//!     python_full_version: "3.11.8",
//!     python_version: "3.11",
//!     sys_platform: "linux",
//! })
//! .unwrap();
//! let installed = InstalledSnapshot::from_pairs([("numpy", "1.26.0")]);
//!
//! let result = Reconciler::new(&installed, &markers).reconcile(["numpy==1.26.0", "scipy"]);
//! assert_eq!(result.to_install(), vec!["scipy"]);
//! ```

pub mod decision;
pub mod installed;
pub mod reconciler;

pub use decision::{Decision, InstallReason, Reconciliation, SkipReason};
pub use installed::{InstalledPackages, InstalledSnapshot};
pub use reconciler::{satisfies, Reconciler};
