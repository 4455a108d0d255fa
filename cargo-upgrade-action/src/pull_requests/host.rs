//! Remote repository host abstraction.

use super::PrError;
use crate::config::Repository;
use crate::working_tree::PullRequestChangeset;
use futures::future::BoxFuture;

/// An open pull request, as needed to find the bot's own PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPullRequest {
    /// GitHub PR number.
    pub number: u64,

    /// Source branch name.
    pub head_ref: String,
}

/// A created or updated pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPullRequest {
    /// GitHub PR number.
    pub number: u64,

    /// GitHub PR URL.
    pub url: String,
}

/// Everything needed to create or refresh the upgrade PR.
#[derive(Debug, Clone)]
pub struct PublishRequest<'a> {
    /// Target repository.
    pub repository: &'a Repository,

    /// PR title.
    pub title: &'a str,

    /// PR body.
    pub body: &'a str,

    /// Branch carrying the change.
    pub head: &'a str,

    /// Message of the single commit.
    pub commit_message: &'a str,

    /// Files to commit.
    pub changes: &'a PullRequestChangeset,

    /// Existing PR for `head`, if one was found.
    pub existing: Option<u64>,

    /// Replace the branch and refresh the PR if they already exist.
    pub update: bool,

    /// Create a PR even when the changeset results in no change.
    pub create_when_empty: bool,
}

/// Pull request operations on the hosting service.
pub trait PullRequestHost: Send + Sync {
    /// Lists every open PR in the repository.
    fn list_open_pull_requests<'a>(
        &'a self,
        repository: &'a Repository,
    ) -> BoxFuture<'a, Result<Vec<OpenPullRequest>, PrError>>;

    /// Returns the number of commits on a PR.
    fn pull_request_commits<'a>(
        &'a self,
        repository: &'a Repository,
        number: u64,
    ) -> BoxFuture<'a, Result<u64, PrError>>;

    /// Commits the changeset to the head branch and creates or updates the PR.
    ///
    /// Returns `None` when there was nothing to commit and `create_when_empty`
    /// is off.
    fn publish<'a>(
        &'a self,
        request: PublishRequest<'a>,
    ) -> BoxFuture<'a, Result<Option<PublishedPullRequest>, PrError>>;
}
