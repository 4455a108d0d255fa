//! Command descriptions.

use std::fmt;
use std::path::Path;

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command for the given program with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Creates a `cargo` command.
    pub fn cargo() -> Self {
        Self::new("cargo")
    }

    /// Creates a `git` command.
    pub fn git() -> Self {
        Self::new("git")
    }

    /// Appends a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends `--manifest-path <path>` when a manifest path is configured.
    pub fn manifest_path(self, manifest_path: Option<&Path>) -> Self {
        match manifest_path {
            Some(path) => self
                .arg("--manifest-path")
                .arg(path.to_string_lossy().into_owned()),
            None => self,
        }
    }

    /// Returns true if the arguments start with the given prefix.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len()
            && self.args.iter().zip(prefix).all(|(arg, expected)| arg == expected)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
