//! Template renderer.

use super::{format_mentions, PR_BODY_TEMPLATE};
use crate::pull_requests::CheckReport;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Template renderer for the upgrade PR body.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the PR body.
    ///
    /// # Arguments
    ///
    /// * `notified_users` - Users to mention; no mention line when empty
    /// * `check` - Result of the verification step; its output is appended on failure
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_pr_body(
        &self,
        notified_users: &[String],
        check: &CheckReport,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "mentions": format_mentions(notified_users),
            "check_succeeded": check.success,
            "check_output": check.output.trim_end(),
        });

        self.render_template(PR_BODY_TEMPLATE, &data)
    }

    /// Renders a template with the given data.
    fn render_template(
        &self,
        template: &str,
        data: &Value,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
