//! Build verification run before publishing.

use crate::command::{CommandRunner, CommandSpec};
use std::path::Path;
use tracing::{info, warn};

/// Result of `cargo check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Whether the check passed.
    pub success: bool,

    /// Combined stdout and stderr.
    pub output: String,
}

/// Runs `cargo check`, which also refreshes `Cargo.lock`.
///
/// Never fails: a failing or unrunnable check is reported in the PR body instead.
pub async fn run_check(runner: &dyn CommandRunner, manifest_path: Option<&Path>) -> CheckReport {
    let spec = CommandSpec::cargo().arg("check").manifest_path(manifest_path);
    match runner.run(&spec).await {
        Ok(output) if output.succeeded() => {
            info!("cargo check passed");
            CheckReport {
                success: true,
                output: output.combined(),
            }
        }
        Ok(output) => {
            warn!(code = ?output.code, "cargo check failed, continuing");
            CheckReport {
                success: false,
                output: output.combined(),
            }
        }
        Err(e) => {
            warn!(error = %e, "cargo check could not run, continuing");
            CheckReport {
                success: false,
                output: e.to_string(),
            }
        }
    }
}
