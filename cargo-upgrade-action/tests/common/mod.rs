#![allow(dead_code)]

use cargo_upgrade_action::{
    ActionConfig, ActionInputs, CommandError, CommandOutput, CommandRunner, CommandSpec,
    OpenPullRequest, PrError, PublishRequest, PublishedPullRequest, PullRequestHost, Repository,
    Runner,
};
use futures::future::BoxFuture;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// A checked out repository with an upgradable manifest.
pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"widgets\"\n\n[dependencies]\nserde = \"1.0.210\"\ntokio = \"1.40.0\"\n",
        )
        .expect("write manifest");
        fs::write(dir.path().join("Cargo.lock"), "version = 4\n").expect("write lockfile");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Fake `cargo`/`git` that reports `outdated` as out of date and records calls.
pub struct FakeCommands {
    outdated: Vec<String>,
    status: String,
    calls: Mutex<Vec<String>>,
}

impl FakeCommands {
    pub fn new(outdated: &[&str]) -> Self {
        Self {
            outdated: outdated.iter().map(|name| name.to_string()).collect(),
            status: " M Cargo.toml\0 M Cargo.lock\0".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// `cargo upgrade` invocations, leaving out `cargo upgrade --version`.
    pub fn upgrade_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call == "cargo upgrade" || call.starts_with("cargo upgrade "))
            .filter(|call| !call.contains("--version"))
            .collect()
    }

    fn answer(&self, spec: &CommandSpec) -> CommandOutput {
        if spec.program == "git" {
            return CommandOutput::success(self.status.clone());
        }
        if !spec.starts_with(&["outdated"]) || spec.args.iter().any(|arg| arg == "--version") {
            return CommandOutput::success("ok\n");
        }

        let target = spec
            .args
            .iter()
            .position(|arg| arg == "-p")
            .and_then(|i| spec.args.get(i + 1));
        let deps: Vec<String> = self
            .outdated
            .iter()
            .filter(|name| target.map_or(true, |t| t == *name))
            .map(|name| {
                format!(r#"{{"name":"{name}","project":"1.0.0","compat":"1.1.0","latest":"2.0.0","kind":"Normal","platform":null}}"#)
            })
            .collect();
        CommandOutput::success(format!(
            "{{\"crate_name\":\"widgets\",\"dependencies\":[{}]}}\n",
            deps.join(",")
        ))
    }
}

impl CommandRunner for FakeCommands {
    fn run<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> BoxFuture<'a, Result<CommandOutput, CommandError>> {
        self.calls.lock().unwrap().push(spec.to_string());
        let output = self.answer(spec);
        Box::pin(async move { Ok(output) })
    }
}

/// What the host was asked to publish.
#[derive(Debug, Clone)]
pub struct Published {
    pub title: String,
    pub body: String,
    pub head: String,
    pub commit_message: String,
    pub paths: Vec<String>,
    pub existing: Option<u64>,
}

/// In-memory PR host.
pub struct FakeHost {
    open: Vec<OpenPullRequest>,
    commits: u64,
    published: Mutex<Vec<Published>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            open: Vec::new(),
            commits: 0,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Adds an open PR on `head_ref` with `commits` commits.
    pub fn with_open(mut self, number: u64, head_ref: &str, commits: u64) -> Self {
        self.open.push(OpenPullRequest {
            number,
            head_ref: head_ref.to_string(),
        });
        self.commits = commits;
        self
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

impl PullRequestHost for FakeHost {
    fn list_open_pull_requests<'a>(
        &'a self,
        _repository: &'a Repository,
    ) -> BoxFuture<'a, Result<Vec<OpenPullRequest>, PrError>> {
        let open = self.open.clone();
        Box::pin(async move { Ok(open) })
    }

    fn pull_request_commits<'a>(
        &'a self,
        _repository: &'a Repository,
        _number: u64,
    ) -> BoxFuture<'a, Result<u64, PrError>> {
        let commits = self.commits;
        Box::pin(async move { Ok(commits) })
    }

    fn publish<'a>(
        &'a self,
        request: PublishRequest<'a>,
    ) -> BoxFuture<'a, Result<Option<PublishedPullRequest>, PrError>> {
        let number = request.existing.unwrap_or(42);
        self.published.lock().unwrap().push(Published {
            title: request.title.to_string(),
            body: request.body.to_string(),
            head: request.head.to_string(),
            commit_message: request.commit_message.to_string(),
            paths: request.changes.paths().into_iter().map(str::to_string).collect(),
            existing: request.existing,
        });
        let url = format!("https://github.com/{}/pull/{number}", request.repository);
        Box::pin(async move { Ok(Some(PublishedPullRequest { number, url })) })
    }
}

/// Inputs for `octo/widgets` with everything else left empty.
pub fn inputs(packages: &str) -> ActionInputs {
    ActionInputs {
        packages: packages.to_string(),
        token: "ghs_test".to_string(),
        repository: "octo/widgets".to_string(),
        ..Default::default()
    }
}

pub fn runner(
    inputs: ActionInputs,
    commands: FakeCommands,
    host: FakeHost,
    repo: &TestRepo,
) -> Runner<FakeCommands, FakeHost> {
    let config = ActionConfig::from_inputs(inputs).expect("valid inputs");
    Runner::with_parts(config, commands, host, repo.path().to_path_buf())
}
