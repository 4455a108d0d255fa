//! Orchestrates a dependency upgrade run.

mod error;

pub use error::RunnerError;

use crate::command::{CommandRunner, TokioCommandRunner};
use crate::config::ActionConfig;
use crate::pull_requests::{publish_pull_request, GitHubHost, PullRequestHost};
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use crate::toolchain::verify_toolchain;
use crate::upgrade::run_upgrade;
use std::path::PathBuf;
use tracing::info;

/// Runs the verify, upgrade and publish steps in sequence.
pub struct Runner<C = TokioCommandRunner, H = GitHubHost> {
    config: ActionConfig,
    commands: C,
    host: H,
    renderer: TemplateRenderer,
    workdir: PathBuf,
}

impl Runner {
    /// Builds a runner that executes commands in `workdir` and talks to GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Octocrab`] if the GitHub client cannot be built.
    pub fn new(config: ActionConfig, workdir: PathBuf) -> Result<Self, RunnerError> {
        let host = GitHubHost::new(config.token())?;
        let commands = TokioCommandRunner::new().with_working_dir(&workdir);
        Ok(Self::with_parts(config, commands, host, workdir))
    }
}

impl<C: CommandRunner, H: PullRequestHost> Runner<C, H> {
    /// Builds a runner from explicit collaborators.
    pub fn with_parts(config: ActionConfig, commands: C, host: H, workdir: PathBuf) -> Self {
        Self {
            config,
            commands,
            host,
            renderer: TemplateRenderer::new(),
            workdir,
        }
    }

    /// Returns the command runner.
    pub fn commands(&self) -> &C {
        &self.commands
    }

    /// Returns the PR host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Executes the full flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on any fatal failure: missing toolchain, failed
    /// outdated check or upgrade, or failure to query existing PRs.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        verify_toolchain(&self.commands).await?;

        let upgrade = run_upgrade(&self.commands, &self.config).await?;
        let mut summary = RunSummary::new(self.config.dry_run(), upgrade);
        if !summary.upgrade.should_publish() {
            info!(outcome = summary.upgrade.as_str(), "No upgrade PR needed");
            return Ok(summary);
        }

        let publish = publish_pull_request(
            &self.commands,
            &self.host,
            &self.renderer,
            &self.config,
            &self.workdir,
        )
        .await?;
        summary.record_publish(publish);

        Ok(summary)
    }
}
