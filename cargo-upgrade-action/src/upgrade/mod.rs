//! Dependency upgrades via `cargo upgrade`.
//!
//! Two modes are supported:
//! - upgrade-all (`packages: "*"`): one bulk outdated check, then a single
//!   unfiltered `cargo upgrade`;
//! - selective: each configured package is checked on its own and only the
//!   outdated ones are upgraded, optionally gated on a set of mandatory packages.

mod error;
mod outcome;

pub use error::UpgradeError;
pub use outcome::UpgradeOutcome;

use crate::command::{CommandRunner, CommandSpec};
use crate::config::ActionConfig;
use crate::outdated::{check_any_outdated, check_outdated};
use tracing::{info, info_span, Instrument};

/// Upgrades outdated dependencies according to `config`.
///
/// # Errors
///
/// Returns [`UpgradeError`] if an outdated check or `cargo upgrade` fails.
pub async fn run_upgrade(
    runner: &dyn CommandRunner,
    config: &ActionConfig,
) -> Result<UpgradeOutcome, UpgradeError> {
    let span = info_span!("upgrade", upgrade_all = config.upgrade_all());
    async {
        if config.upgrade_all() {
            upgrade_all(runner, config).await
        } else {
            upgrade_selected(runner, config).await
        }
    }
    .instrument(span)
    .await
}

async fn upgrade_all(
    runner: &dyn CommandRunner,
    config: &ActionConfig,
) -> Result<UpgradeOutcome, UpgradeError> {
    info!("Trying to upgrade all packages in the manifest");
    if !check_any_outdated(runner, config.manifest_path()).await? {
        info!("All packages are up to date");
        return Ok(UpgradeOutcome::UpToDate);
    }

    cargo_upgrade(runner, config, None).await?;
    info!("Upgraded all packages in the manifest");
    Ok(UpgradeOutcome::UpgradedAll)
}

async fn upgrade_selected(
    runner: &dyn CommandRunner,
    config: &ActionConfig,
) -> Result<UpgradeOutcome, UpgradeError> {
    let mut candidates: Vec<String> = Vec::new();
    for package in config.packages() {
        let outdated = check_outdated(runner, config.manifest_path(), package).await?;
        if outdated && !candidates.contains(package) {
            candidates.push(package.clone());
        }
    }
    info!(packages = ?candidates, "Found outdated packages");

    let missing: Vec<String> = config
        .mandatory_packages()
        .iter()
        .filter(|package| !candidates.contains(*package))
        .cloned()
        .collect();
    if !missing.is_empty() {
        info!(
            mandatory = ?config.mandatory_packages(),
            missing = ?missing,
            "Not all mandatory packages are outdated, skipping upgrade"
        );
        return Ok(UpgradeOutcome::MandatoryNotReady { missing });
    }

    if candidates.is_empty() {
        info!("No packages to upgrade");
        return Ok(UpgradeOutcome::UpToDate);
    }

    for package in &candidates {
        info!(package = %package, "Upgrading package");
        cargo_upgrade(runner, config, Some(package)).await?;
    }
    info!(packages = ?candidates, "Upgraded packages");

    Ok(UpgradeOutcome::UpgradedPackages {
        packages: candidates,
    })
}

/// Runs `cargo upgrade`, scoped to one package when given.
async fn cargo_upgrade(
    runner: &dyn CommandRunner,
    config: &ActionConfig,
    package: Option<&str>,
) -> Result<(), UpgradeError> {
    let mut spec = CommandSpec::cargo().arg("upgrade");
    if let Some(package) = package {
        spec = spec.args(["-p", package, "--recursive", "false"]);
    }
    if config.incompatible() {
        spec = spec.arg("--incompatible");
    }
    let spec = spec.manifest_path(config.manifest_path());

    runner.run(&spec).await?.into_success(&spec)?;
    Ok(())
}
