//! Outdated check error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that can occur while checking for outdated dependencies.
#[derive(Debug, Error)]
pub enum OutdatedError {
    /// `cargo outdated` failed to run or exited unsuccessfully.
    #[error("Could not check whether packages are outdated: {0}")]
    CommandFailed(#[from] CommandError),

    /// A line of `cargo outdated` output was not a valid JSON record.
    #[error("Malformed `cargo outdated` output on line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
