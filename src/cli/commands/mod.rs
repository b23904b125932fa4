//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once and routes CLI subcommands to their implementations.
//! `sync` and `check` share the probe-fetch-reconcile pipeline in [`sync`].

pub mod auto;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod sync;
pub mod venv;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
