//! CLI for the Cargo Upgrade Action.
//!
//! This tool upgrades outdated Cargo dependencies and opens or refreshes a
//! single upgrade PR. Inside GitHub Actions every option is read from the
//! matching `INPUT_*` variable.

use cargo_upgrade_action::{ActionConfig, ActionInputs, RunSummary, Runner, RunnerError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Cargo Upgrade Action - Upgrade outdated dependencies and keep one PR up to date.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comma separated packages to upgrade, or `*` for all.
    #[arg(long, env = "INPUT_PACKAGES")]
    packages: String,

    /// Branch carrying the upgrade PR.
    #[arg(long, env = "INPUT_BRANCH_NAME")]
    branch_name: Option<String>,

    /// Comma separated GitHub logins to mention in the PR.
    #[arg(long, env = "INPUT_NOTIFIED_USERS")]
    notified_users: Option<String>,

    /// Comma separated packages that must all be outdated before upgrading.
    #[arg(long, env = "INPUT_MANDATORY_PACKAGES")]
    mandatory_packages: Option<String>,

    /// Path to the Cargo.toml to upgrade.
    #[arg(long, env = "INPUT_MANIFEST_PATH")]
    manifest_path: Option<PathBuf>,

    /// Allow semver-incompatible upgrades (`true` to enable).
    #[arg(long, env = "INPUT_INCOMPATIBLE", num_args = 0..=1, default_missing_value = "true")]
    incompatible: Option<String>,

    /// GitHub token. Falls back to `GITHUB_TOKEN` when unset.
    #[arg(long, env = "INPUT_TOKEN")]
    token: Option<String>,

    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Directory containing the checked out repository.
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    working_directory: PathBuf,

    /// Preview the PR without publishing it (`true` to enable).
    #[arg(long, env = "INPUT_DRY_RUN", num_args = 0..=1, default_missing_value = "true")]
    dry_run: Option<String>,
}

impl Args {
    fn into_inputs(self) -> (ActionInputs, PathBuf) {
        let inputs = ActionInputs {
            packages: self.packages,
            branch_name: self.branch_name,
            notified_users: self.notified_users,
            mandatory_packages: self.mandatory_packages,
            manifest_path: self.manifest_path,
            incompatible: self.incompatible,
            token: self
                .token
                .filter(|token| !token.trim().is_empty())
                .or_else(|| std::env::var("GITHUB_TOKEN").ok())
                .unwrap_or_default(),
            repository: self.repository,
            dry_run: self.dry_run.as_deref().map(str::trim) == Some("true"),
        };
        (inputs, self.working_directory)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Pick the TLS backend before any HTTPS client exists
    install_crypto_provider();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Installs aws-lc-rs as the process-wide rustls crypto provider.
///
/// octocrab pulls in the `ring` backend as well, so rustls cannot pick one on
/// its own and would panic when the GitHub client is built.
fn install_crypto_provider() {
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let (inputs, workdir) = args.into_inputs();
    let config = ActionConfig::from_inputs(inputs)?;
    let runner = Runner::new(config, workdir)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Upgrade: {}", summary.upgrade.as_str());
    if let Some(publish) = &summary.publish {
        println!("  Pull request: {}", publish.as_str());
    }
    if let Some(url) = summary.pr_url() {
        println!("  URL: {url}");
    }
}
