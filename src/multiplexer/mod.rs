//! Detached terminal sessions under GNU `screen`.
//!
//! Nothing is cached between operations: every call re-queries the
//! multiplexer, so the listing always reflects what is running right now.

pub mod naming;
pub mod selection;

use std::path::{Path, PathBuf};

use crate::extract::extract_session_names;
use crate::process::{CommandRunner, CommandSpec, RunOutcome};

pub use naming::{random_session_name, CAPPED_SESSION_PREFIX, SESSION_PREFIX};
pub use selection::{parse_selection, Selection};

/// A resolved multiplexer executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplexer {
    path: PathBuf,
}

impl Multiplexer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list_spec(&self) -> CommandSpec {
        CommandSpec::for_path(&self.path).arg("-ls")
    }

    pub fn attach_spec(&self, session: &str) -> CommandSpec {
        CommandSpec::for_path(&self.path).args(["-r", session])
    }

    pub fn quit_spec(&self, session: &str) -> CommandSpec {
        CommandSpec::for_path(&self.path).args(["-X", "-S", session, "quit"])
    }

    /// `screen -S <name> -dm <program> <args...>`.
    pub fn detached_launch_spec(&self, name: &str, command: &CommandSpec) -> CommandSpec {
        CommandSpec::for_path(&self.path)
            .args(["-S", name, "-dm", command.program()])
            .args(command.get_args().iter().cloned())
    }

    /// Running sessions in listing order.
    ///
    /// `screen -ls` exits non-zero on several builds even when sessions
    /// exist, so the listing is parsed regardless of exit code. A spawn
    /// failure yields an empty list.
    pub async fn list(&self, runner: &dyn CommandRunner) -> Vec<String> {
        match runner.capture(&self.list_spec()).await {
            Ok(output) => {
                if !output.success() {
                    tracing::debug!(code = output.exit_code, "screen -ls exited non-zero");
                }
                extract_session_names(&output.combined())
            }
            Err(err) => {
                tracing::debug!(error = %err, "screen -ls could not run");
                Vec::new()
            }
        }
    }

    /// Take over the terminal until the operator detaches or the session ends.
    pub async fn attach(&self, runner: &dyn CommandRunner, session: &str) -> RunOutcome {
        runner.interactive(&self.attach_spec(session)).await
    }
}
