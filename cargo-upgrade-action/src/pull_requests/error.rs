//! Pull request error types.

use crate::templates::TemplateError;
use crate::working_tree::WorkingTreeError;
use thiserror::Error;

/// Errors that can occur during PR operations.
#[derive(Debug, Error)]
pub enum PrError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// PR body rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The changeset could not be collected.
    #[error(transparent)]
    WorkingTree(#[from] WorkingTreeError),

    /// The target branch exists but updating it was not allowed.
    #[error("Branch '{branch}' already exists and updates are disabled")]
    BranchExists { branch: String },

    /// The repository reported no default branch.
    #[error("Repository {repository} has no default branch")]
    MissingDefaultBranch { repository: String },
}
