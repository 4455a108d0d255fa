//! Toolchain verification error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that abort the run before any upgrade is attempted.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// `cargo` itself could not be run.
    #[error("Could not execute cargo. Please check that cargo is installed and available in PATH: {source}")]
    CargoMissing {
        #[source]
        source: CommandError,
    },

    /// A cargo plugin is still unusable after installation.
    #[error("cargo {subcommand} is unavailable after installing {crate_name}: {source}")]
    PluginUnavailable {
        subcommand: &'static str,
        crate_name: &'static str,
        #[source]
        source: CommandError,
    },
}
