//! Captured command output.

use super::{CommandError, CommandSpec};

/// Output captured from one finished command.
///
/// Each invocation gets its own capture; nothing is shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Creates a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Creates a failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the process exited with code 0.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns stdout followed by stderr.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        combined
    }

    /// Converts a non-zero exit into [`CommandError::Failed`].
    pub fn into_success(self, spec: &CommandSpec) -> Result<Self, CommandError> {
        if self.succeeded() {
            Ok(self)
        } else {
            Err(CommandError::Failed {
                command: spec.to_string(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_stdout_and_stderr() {
        let output = CommandOutput {
            code: Some(101),
            stdout: "Checking app\n".to_string(),
            stderr: "error[E0425]: cannot find value\n".to_string(),
        };

        assert!(!output.succeeded());
        assert_eq!(
            output.combined(),
            "Checking app\nerror[E0425]: cannot find value\n"
        );
    }

    #[test]
    fn non_zero_exit_becomes_error() {
        let spec = CommandSpec::cargo().arg("outdated");
        let err = CommandOutput::failure(1, "error: no such command\n")
            .into_success(&spec)
            .unwrap_err();

        assert!(matches!(err, CommandError::Failed { code: Some(1), .. }));
        assert_eq!(
            err.to_string(),
            "`cargo outdated` exited with code 1: error: no such command"
        );
    }

    #[test]
    fn zero_exit_passes_through() {
        let spec = CommandSpec::cargo().arg("--version");
        let output = CommandOutput::success("cargo 1.80.0\n")
            .into_success(&spec)
            .unwrap();
        assert_eq!(output.stdout, "cargo 1.80.0\n");
    }
}
