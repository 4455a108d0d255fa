//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while reading action inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input was empty or missing.
    #[error("Input '{name}' is required but was not provided")]
    MissingInput { name: &'static str },

    /// The branch name is not a valid git reference name.
    #[error("Invalid branch name '{name}': {message}")]
    InvalidBranchName { name: String, message: String },

    /// The repository is not in `owner/name` form.
    #[error("Invalid repository '{value}', expected 'owner/name'")]
    InvalidRepository { value: String },
}
