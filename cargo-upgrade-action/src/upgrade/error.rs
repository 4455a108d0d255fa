//! Upgrade error types.

use crate::command::CommandError;
use crate::outdated::OutdatedError;
use thiserror::Error;

/// Errors that can occur while upgrading dependencies.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// An outdated check failed.
    #[error(transparent)]
    Outdated(#[from] OutdatedError),

    /// `cargo upgrade` failed.
    #[error("cargo upgrade failed: {0}")]
    CommandFailed(#[from] CommandError),
}
