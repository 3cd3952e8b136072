//! Tooling & Integration Layer
//!
//! The command-line front end: argument parsing, command execution, and the single status
//! line each invocation prints.

pub mod cli;
pub mod report;

pub use cli::{Cli, CliContext, Commands, OutputFormat};
pub use report::{exit_code, render, CommandReport, StatusLine};
