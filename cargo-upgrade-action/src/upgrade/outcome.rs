//! Upgrade outcome types.

/// What the upgrade step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Every dependency in the manifest was upgraded.
    UpgradedAll,

    /// The listed packages were upgraded, in input order.
    UpgradedPackages {
        /// Upgraded package names.
        packages: Vec<String>,
    },

    /// Nothing was outdated.
    UpToDate,

    /// Some mandatory packages were not outdated, so nothing was upgraded.
    MandatoryNotReady {
        /// Mandatory packages missing from the outdated set.
        missing: Vec<String>,
    },
}

impl UpgradeOutcome {
    /// Returns true if the working tree was changed and a PR should be published.
    #[must_use]
    pub fn should_publish(&self) -> bool {
        matches!(self, Self::UpgradedAll | Self::UpgradedPackages { .. })
    }

    /// Returns the outcome as a string for logs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpgradedAll => "upgraded all",
            Self::UpgradedPackages { .. } => "upgraded packages",
            Self::UpToDate => "up to date",
            Self::MandatoryNotReady { .. } => "mandatory packages not ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_upgrades_publish() {
        assert!(UpgradeOutcome::UpgradedAll.should_publish());
        assert!(UpgradeOutcome::UpgradedPackages {
            packages: vec!["serde".to_string()]
        }
        .should_publish());
        assert!(!UpgradeOutcome::UpToDate.should_publish());
        assert!(!UpgradeOutcome::MandatoryNotReady {
            missing: vec!["tokio".to_string()]
        }
        .should_publish());
    }
}
