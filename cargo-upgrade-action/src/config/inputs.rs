//! Raw action inputs.

use std::path::PathBuf;

/// Unvalidated action inputs, as provided by the workflow.
///
/// GitHub exposes `with:` values to the action as `INPUT_<NAME>` environment
/// variables; the CLI maps those onto this struct.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Comma separated package names, or `*` to upgrade everything.
    pub packages: String,

    /// Branch carrying the upgrade PR.
    pub branch_name: Option<String>,

    /// Comma separated GitHub logins to mention in the PR body.
    pub notified_users: Option<String>,

    /// Comma separated packages that must all be outdated before a PR is opened.
    pub mandatory_packages: Option<String>,

    /// Path to the `Cargo.toml` to operate on.
    pub manifest_path: Option<PathBuf>,

    /// Raw `incompatible` input; only the literal `true` enables it.
    pub incompatible: Option<String>,

    /// GitHub token used for API calls.
    pub token: String,

    /// Repository in `owner/name` form.
    pub repository: String,

    /// Preview the PR instead of publishing it.
    pub dry_run: bool,
}
