//! Parsed `cargo outdated --format=json` output.

use super::OutdatedError;
use serde::Deserialize;

/// One dependency reported by `cargo outdated`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutdatedDependency {
    /// Dependency name.
    pub name: String,

    /// Version currently used by the project.
    pub project: String,

    /// Newest semver-compatible version, or `---` if none.
    pub compat: String,

    /// Newest published version.
    pub latest: String,

    /// Dependency kind (`Normal`, `Development`, `Build`).
    #[serde(default)]
    pub kind: Option<String>,

    /// Target platform restriction, if any.
    #[serde(default)]
    pub platform: Option<String>,
}

/// One JSON record, emitted per workspace member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutdatedCrate {
    /// Workspace member the dependencies belong to.
    pub crate_name: String,

    /// Outdated dependencies of that member.
    pub dependencies: Vec<OutdatedDependency>,
}

/// All records from a single `cargo outdated` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutdatedReport {
    /// Records in output order.
    pub crates: Vec<OutdatedCrate>,
}

impl OutdatedReport {
    /// Parses JSON-lines output, one record per non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`OutdatedError::MalformedLine`] for the first line that is not
    /// a valid record.
    pub fn parse(output: &str) -> Result<Self, OutdatedError> {
        let mut crates = Vec::new();
        for (index, line) in output.lines().enumerate() {
            let line_text = line.trim();
            if line_text.is_empty() {
                continue;
            }
            let record = serde_json::from_str(line_text).map_err(|source| {
                OutdatedError::MalformedLine {
                    line: index + 1,
                    source,
                }
            })?;
            crates.push(record);
        }
        Ok(Self { crates })
    }

    /// Returns true if any record lists a dependency called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.crates
            .iter()
            .any(|krate| krate.dependencies.iter().any(|dep| dep.name == name))
    }

    /// Returns true if any record lists at least one dependency.
    #[must_use]
    pub fn has_outdated(&self) -> bool {
        self.crates.iter().any(|krate| !krate.dependencies.is_empty())
    }
}
