//! Working tree inspection.
//!
//! Lists locally changed files with `git status` and turns them into the
//! [`PullRequestChangeset`] committed to the upgrade branch.

mod changeset;
mod error;

pub use changeset::{FileChange, PullRequestChangeset};
pub use error::WorkingTreeError;

use crate::command::{CommandRunner, CommandSpec};
use std::path::Path;
use tracing::info;

/// Returns the paths that differ from the last commit.
///
/// Added, modified, deleted and untracked files are all included. Renames and
/// copies contribute their destination path.
///
/// # Errors
///
/// Returns [`WorkingTreeError::Status`] if `git status` fails.
pub async fn changed_paths(runner: &dyn CommandRunner) -> Result<Vec<String>, WorkingTreeError> {
    let spec = CommandSpec::git().args(["status", "--porcelain", "-z", "--untracked-files=all"]);
    let output = runner.run(&spec).await?.into_success(&spec)?;
    let paths = parse_porcelain(&output.stdout);
    info!(files = ?paths, "Found updated files");
    Ok(paths)
}

/// Collects changed files and reads their contents from `root`.
///
/// # Errors
///
/// Returns [`WorkingTreeError`] if status or file reads fail.
pub async fn collect_changeset(
    runner: &dyn CommandRunner,
    root: &Path,
) -> Result<PullRequestChangeset, WorkingTreeError> {
    let paths = changed_paths(runner).await?;
    PullRequestChangeset::from_paths(root, paths)
}

/// Parses `git status --porcelain -z` output.
///
/// Entries are `XY <path>` separated by NUL. For renames and copies the
/// original path follows as its own entry and is skipped.
fn parse_porcelain(output: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    let mut entries = output.split('\0').filter(|entry| !entry.is_empty());

    while let Some(entry) = entries.next() {
        let Some((status, path)) = entry.split_at_checked(2) else {
            continue;
        };
        let path = path.strip_prefix(' ').unwrap_or(path);

        if status.contains(['R', 'C']) {
            entries.next();
        }
        if status == "!!" || path.is_empty() {
            continue;
        }
        if !paths.iter().any(|existing| existing == path) {
            paths.push(path.to_string());
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;

    #[test]
    fn parses_modified_added_deleted_and_untracked() {
        let output = " M Cargo.toml\0M  Cargo.lock\0A  src/new.rs\0 D old.txt\0?? notes/todo.md\0";

        assert_eq!(
            parse_porcelain(output),
            vec![
                "Cargo.toml",
                "Cargo.lock",
                "src/new.rs",
                "old.txt",
                "notes/todo.md"
            ]
        );
    }

    #[test]
    fn renames_contribute_destination_only() {
        let output = "R  docs/guide.md\0docs/old-guide.md\0 M Cargo.toml\0";

        assert_eq!(parse_porcelain(output), vec!["docs/guide.md", "Cargo.toml"]);
    }

    #[test]
    fn keeps_paths_with_spaces_verbatim() {
        let output = "?? my file.txt\0";
        assert_eq!(parse_porcelain(output), vec!["my file.txt"]);
    }

    #[test]
    fn empty_status_has_no_paths() {
        assert!(parse_porcelain("").is_empty());
    }

    #[tokio::test]
    async fn runs_git_status() {
        let runner =
            ScriptedRunner::new(|_| Ok(CommandOutput::success(" M Cargo.toml\0 M Cargo.lock\0")));

        let paths = changed_paths(&runner).await.unwrap();

        assert_eq!(paths, vec!["Cargo.toml", "Cargo.lock"]);
        assert_eq!(
            runner.calls(),
            vec!["git status --porcelain -z --untracked-files=all"]
        );
    }
}
