//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid action inputs.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Cargo or its plugins are unusable.
    #[error(transparent)]
    Toolchain(#[from] crate::toolchain::ToolchainError),

    /// Outdated checks or upgrades failed.
    #[error(transparent)]
    Upgrade(#[from] crate::upgrade::UpgradeError),

    /// Looking up or preparing the PR failed.
    #[error(transparent)]
    PullRequest(#[from] crate::pull_requests::PrError),
}
