//! Upgrade pull request publishing.
//!
//! This module verifies the upgraded tree with `cargo check`, finds the bot's
//! existing PR by branch name, and creates or refreshes it with the current
//! working tree changes.

mod check;
mod error;
mod github;
mod host;
mod status;

pub use check::{run_check, CheckReport};
pub use error::PrError;
pub use github::GitHubHost;
pub use host::{OpenPullRequest, PublishRequest, PublishedPullRequest, PullRequestHost};
pub use status::PublishOutcome;

use crate::command::CommandRunner;
use crate::config::ActionConfig;
use crate::templates::{TemplateRenderer, COMMIT_MESSAGE};
use crate::working_tree::{collect_changeset, PullRequestChangeset};
use std::path::Path;
use tracing::{error, info, info_span, Instrument};

/// Number of body lines shown in a dry-run preview.
const PREVIEW_BODY_LINES: usize = 10;

/// Creates or updates the upgrade PR.
///
/// This function:
/// 1. Runs `cargo check` and records the result for the PR body
/// 2. Looks for an open PR whose head branch is the configured branch
/// 3. Leaves that PR alone if it has more than one commit
/// 4. Collects the changed files from the working tree under `workdir`
/// 5. Renders the body and publishes through `host`
///
/// # Errors
///
/// Returns [`PrError`] if listing PRs, reading the working tree or rendering
/// the body fails. A failed publish call is reported as
/// [`PublishOutcome::Failed`] instead.
pub async fn publish_pull_request(
    runner: &dyn CommandRunner,
    host: &dyn PullRequestHost,
    renderer: &TemplateRenderer,
    config: &ActionConfig,
    workdir: &Path,
) -> Result<PublishOutcome, PrError> {
    let span = info_span!(
        "publish",
        repo = %config.repository(),
        branch = %config.branch_name()
    );

    async {
        let check = run_check(runner, config.manifest_path()).await;

        let existing = find_existing_pull_request(host, config).await?;
        match existing {
            Some(number) => {
                info!(pr_number = number, "Found existing PR, will try to update it");
                let commits = host
                    .pull_request_commits(config.repository(), number)
                    .await?;
                if commits > 1 {
                    info!(
                        pr_number = number,
                        commits, "PR has more than 1 commit, will not update it"
                    );
                    return Ok(PublishOutcome::UserTookOver { number });
                }
            }
            None => info!("Trying to create a new PR"),
        }

        let changes = collect_changeset(runner, workdir).await?;
        let body = renderer.render_pr_body(config.notified_users(), &check)?;

        if config.dry_run() {
            print_dry_run_preview(config, &changes, &body, existing);
            return Ok(PublishOutcome::Previewed {
                paths: changes.paths().into_iter().map(str::to_string).collect(),
            });
        }

        let request = PublishRequest {
            repository: config.repository(),
            title: config.pr_title(),
            body: &body,
            head: config.branch_name(),
            commit_message: COMMIT_MESSAGE,
            changes: &changes,
            existing,
            update: true,
            create_when_empty: false,
        };

        match host.publish(request).await {
            Ok(Some(pr)) => {
                info!(pr_number = pr.number, url = %pr.url, "PR is available");
                Ok(PublishOutcome::Published {
                    number: pr.number,
                    url: pr.url,
                })
            }
            Ok(None) => {
                error!("Failed to create a PR, no changes were published");
                Ok(PublishOutcome::NothingToPublish)
            }
            Err(e) => {
                error!(error = %e, "Failed to create a PR");
                Ok(PublishOutcome::Failed {
                    error: e.to_string(),
                })
            }
        }
    }
    .instrument(span)
    .await
}

/// Returns the number of the open PR whose head branch is the configured branch.
async fn find_existing_pull_request(
    host: &dyn PullRequestHost,
    config: &ActionConfig,
) -> Result<Option<u64>, PrError> {
    let open = host.list_open_pull_requests(config.repository()).await?;
    Ok(open
        .into_iter()
        .find(|pr| pr.head_ref == config.branch_name())
        .map(|pr| pr.number))
}

fn print_dry_run_preview(
    config: &ActionConfig,
    changes: &PullRequestChangeset,
    body: &str,
    existing: Option<u64>,
) {
    println!("\n[DRY RUN] Repository: {}", config.repository());
    match existing {
        Some(number) => println!("  Would update PR #{number}"),
        None => println!("  Would create a new PR"),
    }
    println!("  Title: \"{}\"", config.pr_title());
    println!("  Branch: {}", config.branch_name());
    println!("  Changed files ({}):", changes.len());
    for path in changes.paths() {
        println!("    {path}");
    }

    println!("\n  Body:");
    for line in body.lines().take(PREVIEW_BODY_LINES) {
        println!("    {line}");
    }
    if body.lines().count() > PREVIEW_BODY_LINES {
        println!("    ...");
    }
    println!();
}
