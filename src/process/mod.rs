//! External command execution.
//!
//! Commands are argument vectors, never interpolated shell strings. The one
//! exception is `CommandSpec::shell`, reserved for installer pipelines that
//! really are shell pipelines.

pub mod system;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::ConsoleError;

pub use system::SystemRunner;

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    interruptible: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
            interruptible: false,
        }
    }

    /// Invoke a resolved executable by absolute path.
    pub fn for_path(path: &Path) -> Self {
        Self::new(path.display().to_string())
    }

    /// Run `script` through `sh -c`.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Let Ctrl+C stop only this child and hand control back to the caller.
    ///
    /// The console itself ignores SIGINT until the child exits; every other
    /// run leaves the default disposition alone.
    pub fn interruptible(mut self) -> Self {
        self.interruptible = true;
        self
    }

    pub fn is_interruptible(&self) -> bool {
        self.interruptible
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Shell-quoted rendering for operator display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(display_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote `s` for display only when it contains shell metacharacters.
pub fn display_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+%".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// Outcome of a streamed command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    /// Non-zero exit; `code` is `None` when terminated by a signal.
    Failed { code: Option<i32> },
    /// The program could not be started.
    SpawnFailed { reason: String },
    /// The operator pressed Ctrl+C while an interruptible command ran.
    Interrupted,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            Self::Succeeded
        } else {
            Self::Failed {
                code: status.code(),
            }
        }
    }

    /// Map a non-success outcome to the operator-facing error taxonomy.
    pub fn into_error(self, spec: &CommandSpec) -> Option<ConsoleError> {
        match self {
            Self::Succeeded | Self::Interrupted => None,
            Self::Failed { code } => Some(ConsoleError::CommandFailed {
                command: spec.display(),
                code,
            }),
            Self::SpawnFailed { reason } => Some(ConsoleError::SpawnFailed {
                command: spec.display(),
                reason,
            }),
        }
    }
}

/// Captured process output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code, or -1 when terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, for display and pattern matching.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        if self.stdout.is_empty() || self.stdout.ends_with('\n') {
            format!("{}{}", self.stdout, self.stderr)
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Process-execution seam used by every console operation.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with stderr merged into stdout, forwarding lines as they arrive.
    async fn run(&self, spec: &CommandSpec) -> RunOutcome;

    /// Run to completion and return collected output.
    async fn capture(&self, spec: &CommandSpec) -> Result<ExecOutput, ConsoleError>;

    /// Hand the terminal to the child until it exits.
    async fn interactive(&self, spec: &CommandSpec) -> RunOutcome;
}
