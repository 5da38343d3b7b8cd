//! Command-line interface support
//!
//! Command handlers and the CLI error type used by the `cpi-inspector` binary.

pub mod commands;
pub mod error;

pub use error::CliError;
