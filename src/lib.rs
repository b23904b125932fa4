//! pyprep - Prepare a Python environment for a project or a hosted notebook.
//!
//! Locally, pyprep creates a project virtual environment and installs the
//! requirements file into it. Inside a hosted notebook it compares a
//! requirements manifest against what the interpreter already has and
//! installs only what is missing or mismatched.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`environment`] - Hosted notebook detection and run mode resolution
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - Manifest line classification and retrieval
//! - [`python`] - Interpreter probing, virtual environments, and pip
//! - [`reconcile`] - Deciding which declarations need installing
//! - [`shell`] - External command execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use pyprep::manifest::{classify, Declaration};
//!
//! let decl = classify("requests>=2.31  # http client").unwrap();
//! assert!(matches!(decl, Declaration::Parsed { .. }));
//! assert_eq!(decl.text(), "requests>=2.31");
//!
//! assert!(classify("# just a comment").is_none());
//! assert!(classify("-e ./vendor/tool").unwrap().is_passthrough());
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod python;
pub mod reconcile;
pub mod shell;
pub mod ui;

pub use error::{PyprepError, Result};
