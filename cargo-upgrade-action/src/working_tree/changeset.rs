//! File contents committed to the upgrade PR.

use super::WorkingTreeError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// New state of one changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// Full text the file should have.
    Content(String),

    /// The file is gone locally; it must not be created on the branch.
    SkipIfMissing,
}

/// Changed files keyed by repository-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestChangeset {
    files: BTreeMap<String, FileChange>,
}

impl PullRequestChangeset {
    /// Builds a changeset by reading each changed path under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkingTreeError::Read`] if an existing file cannot be read.
    pub fn from_paths<I, S>(root: &Path, paths: I) -> Result<Self, WorkingTreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files = BTreeMap::new();
        for path in paths {
            let path = path.into();
            let full_path = root.join(&path);
            if !full_path.is_file() {
                info!(path = %path, "File does not exist, will not create it");
                files.insert(path, FileChange::SkipIfMissing);
                continue;
            }

            let bytes = std::fs::read(&full_path).map_err(|source| WorkingTreeError::Read {
                path: path.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            files.insert(path, FileChange::Content(content));
        }
        Ok(Self { files })
    }

    /// Returns the change recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&FileChange> {
        self.files.get(path)
    }

    /// Iterates over changes in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileChange)> {
        self.files.iter().map(|(path, change)| (path.as_str(), change))
    }

    /// Returns the changed paths in order.
    pub fn paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Returns the number of changed paths.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
