//! Run summary types.

use crate::pull_requests::PublishOutcome;
use crate::upgrade::UpgradeOutcome;

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// What the upgrade step did.
    pub upgrade: UpgradeOutcome,

    /// What the publish step did, if it ran.
    pub publish: Option<PublishOutcome>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a summary for a run that has not published yet.
    #[must_use]
    pub fn new(dry_run: bool, upgrade: UpgradeOutcome) -> Self {
        Self {
            upgrade,
            publish: None,
            dry_run,
        }
    }

    /// Records the publish result.
    pub fn record_publish(&mut self, outcome: PublishOutcome) {
        self.publish = Some(outcome);
    }

    /// Returns true if publishing failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        matches!(self.publish, Some(PublishOutcome::Failed { .. }))
    }

    /// Returns the URL of the published PR.
    #[must_use]
    pub fn pr_url(&self) -> Option<&str> {
        self.publish.as_ref().and_then(PublishOutcome::url)
    }
}
