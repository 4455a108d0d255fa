#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod command;
pub mod config;
pub mod outdated;
pub mod pull_requests;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod toolchain;
pub mod upgrade;
pub mod working_tree;

pub use command::{CommandError, CommandOutput, CommandRunner, CommandSpec, TokioCommandRunner};
pub use config::{ActionConfig, ActionInputs, ConfigError, Repository, Token, DEFAULT_BRANCH_NAME};
pub use outdated::{
    check_any_outdated, check_outdated, outdated_report, OutdatedCrate, OutdatedDependency,
    OutdatedError, OutdatedReport,
};
pub use pull_requests::{
    publish_pull_request, run_check, CheckReport, GitHubHost, OpenPullRequest, PrError,
    PublishOutcome, PublishRequest, PublishedPullRequest, PullRequestHost,
};
pub use runner::{Runner, RunnerError};
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
pub use toolchain::{verify_toolchain, CargoPlugin, ToolchainError, CARGO_EDIT, CARGO_OUTDATED};
pub use upgrade::{run_upgrade, UpgradeError, UpgradeOutcome};
pub use working_tree::{
    changed_paths, collect_changeset, FileChange, PullRequestChangeset, WorkingTreeError,
};
