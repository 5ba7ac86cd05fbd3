//! Shared test fixtures for resolver, store, runner, and console-flow tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConsoleError;
use crate::process::{CommandRunner, CommandSpec, ExecOutput, RunOutcome};
use crate::ui::{Prompter, RenderSink};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "nexus-tool-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Write a script and mark it executable (0o755).
    pub fn write_executable(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.write_text(relative, content);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to mark fixture executable");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Prompter that replays canned answers.
///
/// Running out of answers behaves like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// Render sink that records every line as `kind: text`.
#[derive(Debug, Clone, Default)]
pub struct CapturingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink poisoned").clone()
    }

    /// True when any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn push(&self, kind: &str, text: &str) {
        self.lines
            .lock()
            .expect("sink poisoned")
            .push(format!("{kind}: {text}"));
    }
}

impl RenderSink for CapturingSink {
    fn section(&self, title: &str) {
        self.push("section", title);
    }
    fn rule(&self) {
        self.push("rule", "");
    }
    fn activity(&self, text: &str) {
        self.push("activity", text);
    }
    fn field(&self, key: &str, value: &str) {
        self.push("field", &format!("{key}={value}"));
    }
    fn menu_item(&self, key: &str, label: &str) {
        self.push("menu", &format!("{key}. {label}"));
    }
    fn detail(&self, text: &str) {
        self.push("detail", text);
    }
    fn success(&self, msg: &str) {
        self.push("success", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn command_banner(&self, command: &str) {
        self.push("running", command);
    }
    fn separator(&self) {
        self.push("separator", "");
    }
    fn clear(&self) {
        self.push("clear", "");
    }
}

/// Command runner that records specs and replays queued outcomes.
///
/// With nothing queued, `run`/`interactive` succeed and `capture` returns
/// empty successful output.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    runs: Arc<Mutex<VecDeque<RunOutcome>>>,
    captures: Arc<Mutex<VecDeque<Result<ExecOutput, ConsoleError>>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next `run` or `interactive` call.
    pub fn push_run(&self, outcome: RunOutcome) {
        self.runs.lock().expect("runner poisoned").push_back(outcome);
    }

    /// Queue the result of the next `capture` call.
    pub fn push_capture(&self, result: Result<ExecOutput, ConsoleError>) {
        self.captures
            .lock()
            .expect("runner poisoned")
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("runner poisoned").clone()
    }

    fn record(&self, spec: &CommandSpec) {
        self.calls.lock().expect("runner poisoned").push(spec.clone());
    }

    fn next_run(&self) -> RunOutcome {
        self.runs
            .lock()
            .expect("runner poisoned")
            .pop_front()
            .unwrap_or(RunOutcome::Succeeded)
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> RunOutcome {
        self.record(spec);
        self.next_run()
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<ExecOutput, ConsoleError> {
        self.record(spec);
        self.captures
            .lock()
            .expect("runner poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ExecOutput {
                    exit_code: 0,
                    stdout: String::new(),
                    stderr: String::new(),
                })
            })
    }

    async fn interactive(&self, spec: &CommandSpec) -> RunOutcome {
        self.record(spec);
        self.next_run()
    }
}

/// Successful captured output with the given stdout.
pub fn stdout_output(stdout: &str) -> ExecOutput {
    ExecOutput {
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
