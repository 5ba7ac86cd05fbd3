//! Node-client invocations and the node-ID decision logic.

use std::path::{Path, PathBuf};

use crate::error::ConsoleError;
use crate::process::CommandSpec;

/// A resolved node-client executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeClient {
    path: PathBuf,
}

impl NodeClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn register_user(&self, wallet_address: &str) -> CommandSpec {
        CommandSpec::for_path(&self.path).args(["register-user", "--wallet-address", wallet_address])
    }

    pub fn register_node(&self) -> CommandSpec {
        CommandSpec::for_path(&self.path).arg("register-node")
    }

    pub fn start(&self, node_id: &str, max_threads: Option<u32>) -> CommandSpec {
        let spec = CommandSpec::for_path(&self.path).args(["start", "--node-id", node_id]);
        match max_threads {
            Some(threads) => spec.args(["--max-threads".to_string(), threads.to_string()]),
            None => spec,
        }
    }
}

/// How a node run is attached to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Block until the node exits or the operator presses Ctrl+C.
    Foreground,
    /// Start inside a detached multiplexer session and return immediately.
    Background { max_threads: Option<u32> },
}

impl LaunchMode {
    pub fn max_threads(self) -> Option<u32> {
        match self {
            Self::Foreground => None,
            Self::Background { max_threads } => max_threads,
        }
    }
}

/// Question asked while settling which node ID to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIdPrompt<'a> {
    /// A saved ID exists; ask whether to use it (`n` declines).
    ConfirmSaved(&'a str),
    /// Saved ID declined; ask for a replacement.
    EnterReplacement,
    /// Nothing saved; ask for one.
    EnterManually,
}

/// Decide the node ID to run with.
///
/// `ask` returns the operator's answer, or `None` when input is closed.
pub fn resolve_node_id<F>(saved: Option<&str>, mut ask: F) -> Result<String, ConsoleError>
where
    F: FnMut(NodeIdPrompt<'_>) -> Option<String>,
{
    let chosen = match saved.filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let answer = ask(NodeIdPrompt::ConfirmSaved(id)).unwrap_or_default();
            if answer.trim().eq_ignore_ascii_case("n") {
                ask(NodeIdPrompt::EnterReplacement).unwrap_or_default()
            } else {
                id.to_string()
            }
        }
        None => ask(NodeIdPrompt::EnterManually).unwrap_or_default(),
    };

    let trimmed = chosen.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::InvalidInput("Node ID cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Trim and validate a wallet address entered by the operator.
pub fn validate_wallet_address(raw: &str) -> Result<String, ConsoleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::InvalidInput(
            "wallet address cannot be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}
