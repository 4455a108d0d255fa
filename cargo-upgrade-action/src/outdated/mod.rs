//! Outdated dependency detection via `cargo outdated`.

mod error;
mod report;

pub use error::OutdatedError;
pub use report::{OutdatedCrate, OutdatedDependency, OutdatedReport};

use crate::command::{CommandRunner, CommandSpec};
use std::path::Path;
use tracing::info;

/// Runs `cargo outdated` and parses its JSON-lines output.
///
/// When `package` is given the check is scoped with `-p <package>`.
///
/// # Errors
///
/// Returns [`OutdatedError`] if the command fails or its output is malformed.
pub async fn outdated_report(
    runner: &dyn CommandRunner,
    manifest_path: Option<&Path>,
    package: Option<&str>,
) -> Result<OutdatedReport, OutdatedError> {
    let mut spec = CommandSpec::cargo().arg("outdated");
    if let Some(package) = package {
        spec = spec.args(["-p", package]);
    }
    let spec = spec.arg("--format=json").manifest_path(manifest_path);

    let output = runner.run(&spec).await?.into_success(&spec)?;
    OutdatedReport::parse(&output.stdout)
}

/// Returns whether `package` has a newer version available.
///
/// # Errors
///
/// Returns [`OutdatedError`] if the check could not be performed.
pub async fn check_outdated(
    runner: &dyn CommandRunner,
    manifest_path: Option<&Path>,
    package: &str,
) -> Result<bool, OutdatedError> {
    let report = outdated_report(runner, manifest_path, Some(package)).await?;
    let outdated = report.contains(package);
    info!(package, outdated, "Checked package");
    Ok(outdated)
}

/// Returns whether any dependency in the manifest has a newer version available.
///
/// # Errors
///
/// Returns [`OutdatedError`] if the check could not be performed.
pub async fn check_any_outdated(
    runner: &dyn CommandRunner,
    manifest_path: Option<&Path>,
) -> Result<bool, OutdatedError> {
    let report = outdated_report(runner, manifest_path, None).await?;
    let outdated = report.has_outdated();
    info!(outdated, "Checked all packages");
    Ok(outdated)
}
