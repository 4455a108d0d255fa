//! Repository coordinates.

use super::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A GitHub repository, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository {
            value: value.to_string(),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo: Repository = "rust-lang/cargo".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "cargo", "/cargo", "rust-lang/", "a/b/c"] {
            assert!(
                matches!(
                    value.parse::<Repository>(),
                    Err(ConfigError::InvalidRepository { .. })
                ),
                "{value} should be rejected"
            );
        }
    }
}
