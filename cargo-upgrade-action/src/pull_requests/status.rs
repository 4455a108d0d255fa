//! Publish outcome types.

/// Result of the publish step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// PR created or updated.
    Published {
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL.
        url: String,
    },

    /// The existing PR has commits from someone else; left untouched.
    UserTookOver {
        /// GitHub PR number.
        number: u64,
    },

    /// The changeset was empty, so no PR was created.
    NothingToPublish,

    /// Dry run; nothing was sent to GitHub.
    Previewed {
        /// Paths that would have been committed.
        paths: Vec<String>,
    },

    /// The publish call failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl PublishOutcome {
    /// Returns the outcome as a string for logs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published { .. } => "published",
            Self::UserTookOver { .. } => "skipped",
            Self::NothingToPublish => "nothing to publish",
            Self::Previewed { .. } => "previewed",
            Self::Failed { .. } => "failed",
        }
    }

    /// Returns the PR URL if published.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Published { url, .. } => Some(url),
            _ => None,
        }
    }
}
