//! PR body rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Commit message used for the single upgrade commit.
pub const COMMIT_MESSAGE: &str = "build(cargo): update dependencies";

/// Body of every upgrade PR.
///
/// Variables:
/// - `mentions`: `@user` tokens, empty when nobody is notified
/// - `check_succeeded`: whether `cargo check` passed
/// - `check_output`: captured `cargo check` output
pub const PR_BODY_TEMPLATE: &str = r#"Hello! This is a friendly bot trying to update some of the dependencies in this repository.

This PR is the result of running the bot for you.
If there are new updates, this PR will try to replace the existing commit with new ones.
Unfortunately it cannot resolve conflicts or breaking changes automatically.
If that happens, please try to resolve it manually.

You can add new commits on top of this PR to do so. The bot will then stop updating this PR and let you resolve it.
{{#if mentions}}

The bot sees some users who may want to check this PR, so they are mentioned here: {{mentions}}
{{/if}}
{{#unless check_succeeded}}

It looks like there were some errors while trying to upgrade dependencies. Please check the error message below:

```
{{check_output}}
```
{{/unless}}
"#;

/// Formats users as `@user` mentions joined by commas.
#[must_use]
pub fn format_mentions(users: &[String]) -> String {
    users
        .iter()
        .map(|user| format!("@{}", user.trim_start_matches('@')))
        .collect::<Vec<_>>()
        .join(",")
}
