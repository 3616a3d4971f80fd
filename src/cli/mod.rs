//! CLI support for esfilter
//!
//! Provides programmatic access to the `esfilter` commands so other tools
//! can compile or inspect expressions the same way the binary does.

mod check;
mod explain;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use explain::{Explanation, explain};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Compile(#[from] crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    #[error("No field registry provided. Use --registry <FILE>.")]
    NoRegistry,
}

impl From<crate::ConfigError> for CliError {
    fn from(e: crate::ConfigError) -> Self {
        CliError::Compile(e.into())
    }
}
