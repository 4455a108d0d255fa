//! Working tree error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that can occur while inspecting the working tree.
#[derive(Debug, Error)]
pub enum WorkingTreeError {
    /// `git status` failed.
    #[error("Failed to read working tree status: {0}")]
    Status(#[from] CommandError),

    /// A changed file could not be read.
    #[error("Failed to read changed file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
