//! External command execution.

pub mod command;

pub use command::{execute, execute_checked, CommandLine, CommandOptions, CommandResult};
