//! [`PullRequestHost`] implementation for GitHub.
//!
//! Publishing writes the whole changeset as one commit on top of the default
//! branch using the git data API, force-moves the head branch to it, and then
//! creates or refreshes the PR. Every run replaces the previous bot commit.

use super::host::{OpenPullRequest, PublishRequest, PublishedPullRequest, PullRequestHost};
use super::PrError;
use crate::config::{Repository, Token};
use crate::working_tree::{FileChange, PullRequestChangeset};
use futures::future::BoxFuture;
use octocrab::params::State;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[cfg(test)]
mod test_server;

/// Results per page when listing open PRs.
const PULLS_PER_PAGE: u8 = 50;

/// Mode for files that do not exist at the base commit.
const DEFAULT_FILE_MODE: &str = "100644";

/// Git mode of a symbolic link.
const SYMLINK_MODE: &str = "120000";

/// GitHub-backed pull request host.
#[derive(Debug, Clone)]
pub struct GitHubHost {
    octocrab: Octocrab,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    name: String,
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    sha: String,
    tree: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitTree {
    sha: String,
    tree: Vec<GitTreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct GitTreeEntry {
    path: String,
    mode: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct NewTree<'a> {
    base_tree: &'a str,
    tree: Vec<NewTreeEntry<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct NewTreeEntry<'a> {
    path: &'a str,
    mode: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct NewCommit<'a> {
    message: &'a str,
    tree: &'a str,
    parents: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct NewRef<'a> {
    #[serde(rename = "ref")]
    name: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRef<'a> {
    sha: &'a str,
    force: bool,
}

/// State of the default branch the upgrade commit is based on.
struct BaseSnapshot {
    branch: String,
    commit_sha: String,
    tree_sha: String,
    /// Blob paths at the base commit, mapped to their file mode.
    files: HashMap<String, String>,
}

impl GitHubHost {
    /// Builds a host authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be constructed.
    pub fn new(token: &Token) -> Result<Self, octocrab::Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token.expose().to_string())
            .build()?;
        Ok(Self { octocrab })
    }

    /// Wraps an existing client.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    async fn base_snapshot(&self, repository: &Repository) -> Result<BaseSnapshot, PrError> {
        let info: RepositoryInfo = self
            .octocrab
            .get(repo_route(repository, ""), None::<&()>)
            .await?;
        let branch = info
            .default_branch
            .ok_or_else(|| PrError::MissingDefaultBranch {
                repository: repository.to_string(),
            })?;

        let head: GitRef = self
            .octocrab
            .get(
                repo_route(repository, &format!("git/ref/heads/{branch}")),
                None::<&()>,
            )
            .await?;
        let commit: GitCommit = self
            .octocrab
            .get(
                repo_route(repository, &format!("git/commits/{}", head.object.sha)),
                None::<&()>,
            )
            .await?;
        let tree: GitTree = self
            .octocrab
            .get(
                repo_route(repository, &format!("git/trees/{}", commit.tree.sha)),
                Some(&[("recursive", "1")]),
            )
            .await?;
        if tree.truncated {
            warn!(branch = %branch, "Base tree listing was truncated, some files may be skipped");
        }

        let files = tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob")
            .map(|entry| (entry.path, entry.mode))
            .collect();

        Ok(BaseSnapshot {
            branch,
            commit_sha: commit.sha,
            tree_sha: tree.sha,
            files,
        })
    }

    async fn branch_exists(&self, repository: &Repository, branch: &str) -> Result<bool, PrError> {
        let full_name = format!("refs/heads/{branch}");
        let refs: Vec<GitRef> = self
            .octocrab
            .get(
                repo_route(repository, &format!("git/matching-refs/heads/{branch}")),
                None::<&()>,
            )
            .await?;
        Ok(refs.iter().any(|r| r.name == full_name))
    }

    async fn publish_changes(
        &self,
        request: PublishRequest<'_>,
    ) -> Result<Option<PublishedPullRequest>, PrError> {
        let repository = request.repository;
        let base = self.base_snapshot(repository).await?;
        debug!(base = %base.branch, commit = %base.commit_sha, "Resolved base commit");

        let entries = tree_entries(request.changes, &base.files);
        if entries.is_empty() && !request.create_when_empty {
            info!("No file changes to commit");
            return Ok(None);
        }

        let tree_sha = if entries.is_empty() {
            base.tree_sha.clone()
        } else {
            let tree: GitTree = self
                .octocrab
                .post(
                    repo_route(repository, "git/trees"),
                    Some(&NewTree {
                        base_tree: &base.tree_sha,
                        tree: entries,
                    }),
                )
                .await?;
            tree.sha
        };
        if tree_sha == base.tree_sha && !request.create_when_empty {
            info!("Changes are identical to the base branch");
            return Ok(None);
        }

        let commit: GitCommit = self
            .octocrab
            .post(
                repo_route(repository, "git/commits"),
                Some(&NewCommit {
                    message: request.commit_message,
                    tree: &tree_sha,
                    parents: [&base.commit_sha],
                }),
            )
            .await?;
        debug!(commit = %commit.sha, "Created upgrade commit");

        if self.branch_exists(repository, request.head).await? {
            if !request.update {
                return Err(PrError::BranchExists {
                    branch: request.head.to_string(),
                });
            }
            let _: GitRef = self
                .octocrab
                .patch(
                    repo_route(repository, &format!("git/refs/heads/{}", request.head)),
                    Some(&UpdateRef {
                        sha: &commit.sha,
                        force: true,
                    }),
                )
                .await?;
            info!(branch = %request.head, "Replaced branch commit");
        } else {
            let _: GitRef = self
                .octocrab
                .post(
                    repo_route(repository, "git/refs"),
                    Some(&NewRef {
                        name: format!("refs/heads/{}", request.head),
                        sha: &commit.sha,
                    }),
                )
                .await?;
            info!(branch = %request.head, "Created branch");
        }

        let pulls = self.octocrab.pulls(&repository.owner, &repository.name);
        let pr = match request.existing {
            Some(number) => {
                pulls
                    .update(number)
                    .title(request.title)
                    .body(request.body)
                    .send()
                    .await?
            }
            None => {
                pulls
                    .create(request.title, request.head, &base.branch)
                    .body(request.body)
                    .send()
                    .await?
            }
        };

        let url = pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| format!("https://github.com/{repository}/pull/{}", pr.number));

        Ok(Some(PublishedPullRequest {
            number: pr.number,
            url,
        }))
    }
}

impl PullRequestHost for GitHubHost {
    fn list_open_pull_requests<'a>(
        &'a self,
        repository: &'a Repository,
    ) -> BoxFuture<'a, Result<Vec<OpenPullRequest>, PrError>> {
        Box::pin(async move {
            let first_page = self
                .octocrab
                .pulls(&repository.owner, &repository.name)
                .list()
                .state(State::Open)
                .per_page(PULLS_PER_PAGE)
                .send()
                .await?;
            let pulls = self.octocrab.all_pages(first_page).await?;

            Ok(pulls
                .into_iter()
                .map(|pr| OpenPullRequest {
                    number: pr.number,
                    head_ref: pr.head.ref_field,
                })
                .collect())
        })
    }

    fn pull_request_commits<'a>(
        &'a self,
        repository: &'a Repository,
        number: u64,
    ) -> BoxFuture<'a, Result<u64, PrError>> {
        Box::pin(async move {
            let pr = self
                .octocrab
                .pulls(&repository.owner, &repository.name)
                .get(number)
                .await?;
            Ok(pr.commits.unwrap_or_default())
        })
    }

    fn publish<'a>(
        &'a self,
        request: PublishRequest<'a>,
    ) -> BoxFuture<'a, Result<Option<PublishedPullRequest>, PrError>> {
        Box::pin(self.publish_changes(request))
    }
}

/// Builds `/repos/{owner}/{name}/{path}`.
fn repo_route(repository: &Repository, path: &str) -> String {
    if path.is_empty() {
        format!("/repos/{}/{}", repository.owner, repository.name)
    } else {
        format!("/repos/{}/{}/{path}", repository.owner, repository.name)
    }
}

/// Selects the changeset entries to write on top of the base tree.
///
/// Files are only updated, never created: paths missing at the base commit,
/// symlinks and files deleted locally are skipped. Existing file modes are
/// preserved.
fn tree_entries<'a>(
    changes: &'a PullRequestChangeset,
    base_files: &'a HashMap<String, String>,
) -> Vec<NewTreeEntry<'a>> {
    let mut entries = Vec::new();
    for (path, change) in changes.iter() {
        let FileChange::Content(content) = change else {
            continue;
        };
        let Some(mode) = base_files.get(path) else {
            info!(path, "File does not exist on the base branch, will not create it");
            continue;
        };
        // The local read followed the link, so the content is the target's.
        if mode == SYMLINK_MODE {
            info!(path, "File is a symlink on the base branch, will not replace it");
            continue;
        }
        entries.push(NewTreeEntry {
            path,
            mode: if mode.is_empty() {
                DEFAULT_FILE_MODE
            } else {
                mode.as_str()
            },
            kind: "blob",
            content,
        });
    }
    entries
}
