//! External command execution.
//!
//! Every `cargo` and `git` invocation goes through a [`CommandRunner`], which
//! returns the captured output of that single invocation as a
//! [`CommandOutput`].

mod error;
mod output;
mod spec;

pub use error::CommandError;
pub use output::CommandOutput;
pub use spec::CommandSpec;

use futures::future::BoxFuture;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs external commands to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `spec` and returns its captured output.
    ///
    /// A non-zero exit is not an error at this level; callers decide how to
    /// treat it via [`CommandOutput::into_success`].
    fn run<'a>(&'a self, spec: &'a CommandSpec)
        -> BoxFuture<'a, Result<CommandOutput, CommandError>>;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioCommandRunner {
    working_dir: Option<PathBuf>,
}

impl TokioCommandRunner {
    /// Creates a runner that executes commands in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes commands in `working_dir` instead of the current directory.
    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }
}

impl CommandRunner for TokioCommandRunner {
    fn run<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> BoxFuture<'a, Result<CommandOutput, CommandError>> {
        Box::pin(async move {
            debug!(command = %spec, "Running command");

            let mut command = Command::new(&spec.program);
            command
                .args(&spec.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            if let Some(dir) = &self.working_dir {
                command.current_dir(dir);
            }

            let output = command
                .output()
                .await
                .map_err(|source| CommandError::Spawn {
                    command: spec.to_string(),
                    source,
                })?;

            let output = CommandOutput::from(output);
            debug!(
                command = %spec,
                code = ?output.code,
                stdout = %output.stdout.trim_end(),
                stderr = %output.stderr.trim_end(),
                "Command finished"
            );
            Ok(output)
        })
    }
}
