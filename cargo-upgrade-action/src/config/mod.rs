//! Action configuration.
//!
//! This module turns the raw workflow inputs into a validated, read-only
//! [`ActionConfig`] that is built once at startup.

mod error;
mod inputs;
mod repository;

pub use error::ConfigError;
pub use inputs::ActionInputs;
pub use repository::Repository;

use bstr::ByteSlice;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Branch used for the upgrade PR when none is configured.
pub const DEFAULT_BRANCH_NAME: &str = "__gha-cargo-upgrade-action";

/// Input value selecting every package in the manifest.
pub const WILDCARD: &str = "*";

const PR_TITLE_PREFIX: &str = "[BOT] build(cargo): upgrade dependencies ";

/// A GitHub token that never appears in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Returns the raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Validated action configuration.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Packages to upgrade, in input order without duplicates. Empty in wildcard mode.
    packages: Vec<String>,
    /// Whether every package should be upgraded.
    upgrade_all: bool,
    /// Branch carrying the upgrade PR.
    branch_name: String,
    /// Whether `--incompatible` is passed to `cargo upgrade`.
    incompatible: bool,
    /// Packages that must all be outdated before anything is upgraded.
    mandatory_packages: Vec<String>,
    /// Users mentioned in the PR body.
    notified_users: Vec<String>,
    /// Manifest passed to cargo via `--manifest-path`.
    manifest_path: Option<PathBuf>,
    /// Title of the upgrade PR.
    pr_title: String,
    /// GitHub token.
    token: Token,
    /// Repository the PR is opened against.
    repository: Repository,
    /// Whether to preview instead of publishing.
    dry_run: bool,
}

impl ActionConfig {
    /// Validates raw inputs into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required input is missing, the branch name
    /// is not a valid git reference, or the repository is malformed.
    pub fn from_inputs(inputs: ActionInputs) -> Result<Self, ConfigError> {
        let raw_packages = inputs.packages.trim();
        info!(packages = %raw_packages, "Packages specified");
        if raw_packages.is_empty() {
            return Err(ConfigError::MissingInput { name: "packages" });
        }

        let upgrade_all = raw_packages == WILDCARD;
        let packages = if upgrade_all {
            Vec::new()
        } else {
            split_list(raw_packages)
        };
        if !upgrade_all && packages.is_empty() {
            return Err(ConfigError::MissingInput { name: "packages" });
        }

        let branch_name = match inputs.branch_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                info!(branch = %name, "Branch name specified");
                name.to_string()
            }
            _ => {
                info!(branch = DEFAULT_BRANCH_NAME, "Branch name not specified, using default");
                DEFAULT_BRANCH_NAME.to_string()
            }
        };
        validate_branch_name(&branch_name)?;

        let notified_users = inputs
            .notified_users
            .as_deref()
            .map(split_list)
            .unwrap_or_default();
        if !notified_users.is_empty() {
            info!(users = ?notified_users, "Notified users specified");
        }

        let mandatory_packages = inputs
            .mandatory_packages
            .as_deref()
            .map(split_list)
            .unwrap_or_default();

        let token = inputs.token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingInput { name: "token" });
        }

        let repository = inputs.repository.parse()?;

        let pr_title = if upgrade_all {
            PR_TITLE_PREFIX.to_string()
        } else {
            format!("{PR_TITLE_PREFIX}for {raw_packages}")
        };

        let config = Self {
            packages,
            upgrade_all,
            branch_name,
            incompatible: inputs.incompatible.as_deref().map(str::trim) == Some("true"),
            mandatory_packages,
            notified_users,
            manifest_path: inputs
                .manifest_path
                .filter(|path| !path.as_os_str().is_empty()),
            pr_title,
            token: Token(token.to_string()),
            repository,
            dry_run: inputs.dry_run,
        };

        info!(config = ?config, "Action configuration loaded");
        Ok(config)
    }

    /// Returns the packages to upgrade. Empty when [`Self::upgrade_all`] is set.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Returns whether every package in the manifest should be upgraded.
    pub fn upgrade_all(&self) -> bool {
        self.upgrade_all
    }

    /// Returns the branch carrying the upgrade PR.
    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// Returns whether incompatible upgrades are allowed.
    pub fn incompatible(&self) -> bool {
        self.incompatible
    }

    /// Returns the packages gating the upgrade.
    pub fn mandatory_packages(&self) -> &[String] {
        &self.mandatory_packages
    }

    /// Returns the users to mention in the PR body.
    pub fn notified_users(&self) -> &[String] {
        &self.notified_users
    }

    /// Returns the configured manifest path.
    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    /// Returns the PR title.
    pub fn pr_title(&self) -> &str {
        &self.pr_title
    }

    /// Returns the GitHub token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the target repository.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Splits a comma separated input, trimming entries and dropping empty or repeated ones.
fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

fn validate_branch_name(name: &str) -> Result<(), ConfigError> {
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidBranchName {
            name: name.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(packages: &str) -> ActionInputs {
        ActionInputs {
            packages: packages.to_string(),
            token: "ghp_secret".to_string(),
            repository: "octo/widgets".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn wildcard_selects_upgrade_all() {
        let config = ActionConfig::from_inputs(inputs("*")).unwrap();

        assert!(config.upgrade_all());
        assert!(config.packages().is_empty());
        assert_eq!(config.pr_title(), "[BOT] build(cargo): upgrade dependencies ");
        assert_eq!(config.branch_name(), DEFAULT_BRANCH_NAME);
        assert!(!config.incompatible());
        assert!(config.notified_users().is_empty());
    }

    #[test]
    fn package_list_is_trimmed_and_deduplicated() {
        let config = ActionConfig::from_inputs(inputs("serde, tokio,serde,,")).unwrap();

        assert!(!config.upgrade_all());
        assert_eq!(config.packages(), ["serde", "tokio"]);
        assert_eq!(
            config.pr_title(),
            "[BOT] build(cargo): upgrade dependencies for serde, tokio,serde,,"
        );
    }

    #[test]
    fn reads_optional_inputs() {
        let config = ActionConfig::from_inputs(ActionInputs {
            branch_name: Some("deps/upgrade".to_string()),
            notified_users: Some("alice,bob".to_string()),
            mandatory_packages: Some("tokio".to_string()),
            manifest_path: Some(PathBuf::from("app/Cargo.toml")),
            incompatible: Some("true".to_string()),
            dry_run: true,
            ..inputs("tokio,hyper")
        })
        .unwrap();

        assert_eq!(config.branch_name(), "deps/upgrade");
        assert_eq!(config.notified_users(), ["alice", "bob"]);
        assert_eq!(config.mandatory_packages(), ["tokio"]);
        assert_eq!(config.manifest_path(), Some(Path::new("app/Cargo.toml")));
        assert!(config.incompatible());
        assert!(config.dry_run());
    }

    #[test]
    fn only_literal_true_enables_incompatible() {
        for raw in ["True", "yes", "1", ""] {
            let config = ActionConfig::from_inputs(ActionInputs {
                incompatible: Some(raw.to_string()),
                ..inputs("*")
            })
            .unwrap();
            assert!(!config.incompatible(), "{raw} should not enable incompatible");
        }
    }

    #[test]
    fn blank_branch_name_falls_back_to_default() {
        let config = ActionConfig::from_inputs(ActionInputs {
            branch_name: Some("  ".to_string()),
            ..inputs("*")
        })
        .unwrap();
        assert_eq!(config.branch_name(), DEFAULT_BRANCH_NAME);
    }

    #[test]
    fn rejects_invalid_branch_name() {
        for name in ["feature..x", "bad~name"] {
            let result = ActionConfig::from_inputs(ActionInputs {
                branch_name: Some(name.to_string()),
                ..inputs("*")
            });
            assert!(matches!(result, Err(ConfigError::InvalidBranchName { .. })));
        }
    }

    #[test]
    fn requires_packages_and_token() {
        assert!(matches!(
            ActionConfig::from_inputs(inputs(" ")),
            Err(ConfigError::MissingInput { name: "packages" })
        ));
        assert!(matches!(
            ActionConfig::from_inputs(inputs(",,")),
            Err(ConfigError::MissingInput { name: "packages" })
        ));
        assert!(matches!(
            ActionConfig::from_inputs(ActionInputs {
                token: String::new(),
                ..inputs("*")
            }),
            Err(ConfigError::MissingInput { name: "token" })
        ));
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let config = ActionConfig::from_inputs(inputs("*")).unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("ghp_secret"));
        assert_eq!(config.token().expose(), "ghp_secret");
    }
}
