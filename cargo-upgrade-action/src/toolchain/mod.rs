//! Cargo toolchain verification.
//!
//! Makes sure `cargo` is usable and that the `cargo upgrade` and
//! `cargo outdated` plugins are installed at their pinned versions.

mod error;

pub use error::ToolchainError;

use crate::command::{CommandError, CommandRunner, CommandSpec};
use tracing::{info, info_span, warn, Instrument};

/// A cargo subcommand provided by a separately installed crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoPlugin {
    /// Subcommand name, as in `cargo <subcommand>`.
    pub subcommand: &'static str,
    /// Crate providing the subcommand.
    pub crate_name: &'static str,
    /// Pinned version.
    pub version: &'static str,
}

/// Provides `cargo upgrade`.
pub const CARGO_EDIT: CargoPlugin = CargoPlugin {
    subcommand: "upgrade",
    crate_name: "cargo-edit",
    version: "0.11.6",
};

/// Provides `cargo outdated`.
pub const CARGO_OUTDATED: CargoPlugin = CargoPlugin {
    subcommand: "outdated",
    crate_name: "cargo-outdated",
    version: "0.11.1",
};

impl CargoPlugin {
    fn version_command(&self) -> CommandSpec {
        CommandSpec::cargo().args([self.subcommand, "--version"])
    }

    fn install_command(&self) -> CommandSpec {
        CommandSpec::cargo().args([
            "install".to_string(),
            "--locked".to_string(),
            "--force".to_string(),
            format!("{}@{}", self.crate_name, self.version),
        ])
    }
}

/// Verifies cargo and installs the required plugins where needed.
///
/// # Errors
///
/// Returns [`ToolchainError::CargoMissing`] if `cargo --version` fails, or
/// [`ToolchainError::PluginUnavailable`] if a plugin still cannot report its
/// version after the install attempt.
pub async fn verify_toolchain(runner: &dyn CommandRunner) -> Result<(), ToolchainError> {
    async {
        let cargo_version = CommandSpec::cargo().arg("--version");
        let output = runner
            .run(&cargo_version)
            .await
            .and_then(|output| output.into_success(&cargo_version))
            .map_err(|source| ToolchainError::CargoMissing { source })?;
        info!(version = %output.stdout.trim(), "Found cargo");

        for plugin in [CARGO_EDIT, CARGO_OUTDATED] {
            ensure_plugin(runner, plugin).await;
        }

        // Installation can fail silently above; this is the real gate.
        for plugin in [CARGO_EDIT, CARGO_OUTDATED] {
            let spec = plugin.version_command();
            runner
                .run(&spec)
                .await
                .and_then(|output| output.into_success(&spec))
                .map_err(|source| ToolchainError::PluginUnavailable {
                    subcommand: plugin.subcommand,
                    crate_name: plugin.crate_name,
                    source,
                })?;
        }

        info!("Cargo toolchain is ready");
        Ok(())
    }
    .instrument(info_span!("verify_toolchain"))
    .await
}

/// Installs `plugin` unless the installed version already matches.
async fn ensure_plugin(runner: &dyn CommandRunner, plugin: CargoPlugin) {
    match installed_version(runner, plugin).await {
        Ok(stdout) if stdout.contains(plugin.version) => {
            info!(
                plugin = plugin.crate_name,
                version = plugin.version,
                "Plugin already installed"
            );
            return;
        }
        Ok(stdout) => {
            info!(
                plugin = plugin.crate_name,
                installed = %stdout.trim(),
                expected = plugin.version,
                "Plugin version mismatch, reinstalling"
            );
        }
        Err(e) => {
            info!(plugin = plugin.crate_name, error = %e, "Plugin not usable, installing");
        }
    }

    let install = plugin.install_command();
    let result = runner
        .run(&install)
        .await
        .and_then(|output| output.into_success(&install));
    if let Err(e) = result {
        warn!(plugin = plugin.crate_name, error = %e, "Plugin installation failed");
    }
}

async fn installed_version(
    runner: &dyn CommandRunner,
    plugin: CargoPlugin,
) -> Result<String, CommandError> {
    let spec = plugin.version_command();
    let output = runner.run(&spec).await?.into_success(&spec)?;
    Ok(output.stdout)
}
