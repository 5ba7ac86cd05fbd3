//! Console session context: everything a menu action needs, passed explicitly.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::ConsoleError;
use crate::multiplexer::Multiplexer;
use crate::node::NodeClient;
use crate::process::{CommandRunner, CommandSpec, RunOutcome};
use crate::resolve::find_executable;
use crate::store::{ConfigStore, LoadStatus, PersistedConfig};
use crate::ui::{Prompter, RenderSink};

/// Hint attached to a missing node client.
pub(super) const NODE_CLIENT_MISSING_HINT: &str =
    "Run 'Check dependency status' (1) and 'Update Nexus CLI' (2).";
/// Hint attached to a missing multiplexer.
pub(super) const MULTIPLEXER_MISSING_HINT: &str =
    "Run 'Check dependency status' (1) for details.";

/// One operator session.
///
/// Owns the persisted identity, the resolved tool paths, and the I/O seams.
/// Tool paths are re-resolved on demand because installs change them.
pub struct Console {
    user_home: PathBuf,
    settings: Settings,
    store: ConfigStore,
    state: PersistedConfig,
    multiplexer: Option<Multiplexer>,
    node_client: Option<NodeClient>,
    pub(super) sink: Box<dyn RenderSink>,
    prompter: Box<dyn Prompter>,
    pub(super) runner: Box<dyn CommandRunner>,
    pub(super) rng: StdRng,
}

impl Console {
    /// Build a console for `user_home`. Tools are resolved immediately; the
    /// persisted record is not loaded until `load_state`.
    pub fn new(
        user_home: impl Into<PathBuf>,
        settings: Settings,
        sink: Box<dyn RenderSink>,
        prompter: Box<dyn Prompter>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        let user_home = user_home.into();
        let store = match &settings.state.file {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::for_user_home(&user_home),
        };
        let mut console = Self {
            user_home,
            settings,
            store,
            state: PersistedConfig::default(),
            multiplexer: None,
            node_client: None,
            sink,
            prompter,
            runner,
            rng: StdRng::from_entropy(),
        };
        console.refresh_tools();
        console
    }

    /// Replace the session-name generator with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn user_home(&self) -> &Path {
        &self.user_home
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &PersistedConfig {
        &self.state
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn multiplexer(&self) -> Option<&Multiplexer> {
        self.multiplexer.as_ref()
    }

    pub fn node_client(&self) -> Option<&NodeClient> {
        self.node_client.as_ref()
    }

    /// Read the persisted record and report how that went.
    pub fn load_state(&mut self) {
        let (state, status) = self.store.load_with_status();
        self.state = state;
        match status {
            LoadStatus::Loaded => self.sink.success("Previous configuration loaded."),
            LoadStatus::Missing => {}
            LoadStatus::Failed(err) => {
                let err = ConsoleError::ConfigIo(err);
                self.sink.error(&format!("Failed to load {err}"));
            }
        }
    }

    /// Re-resolve both external tools.
    pub fn refresh_tools(&mut self) {
        self.multiplexer = find_executable(&self.settings.tools.multiplexer, Some(&self.user_home))
            .map(Multiplexer::new);
        self.refresh_node_client();
    }

    /// Re-resolve the node client only; it is the tool installs replace.
    pub fn refresh_node_client(&mut self) {
        self.node_client = find_executable(&self.settings.tools.node_client, Some(&self.user_home))
            .map(NodeClient::new);
    }

    pub(super) fn require_node_client(&self) -> Result<NodeClient, ConsoleError> {
        self.node_client
            .clone()
            .ok_or_else(|| ConsoleError::ToolUnavailable {
                tool: self.settings.tools.node_client.clone(),
                hint: NODE_CLIENT_MISSING_HINT.into(),
            })
    }

    pub(super) fn require_multiplexer(&self) -> Result<Multiplexer, ConsoleError> {
        self.multiplexer
            .clone()
            .ok_or_else(|| ConsoleError::ToolUnavailable {
                tool: self.settings.tools.multiplexer.clone(),
                hint: MULTIPLEXER_MISSING_HINT.into(),
            })
    }

    /// Apply `update` to the in-memory record and write it out.
    ///
    /// A write failure is reported but the in-memory value is kept.
    pub(super) fn persist(&mut self, update: impl FnOnce(&mut PersistedConfig)) {
        update(&mut self.state);
        if let Err(err) = self.store.save(&self.state) {
            let err = ConsoleError::from(err);
            self.sink.error(&format!("Failed to save {err}"));
        }
    }

    /// Prompt for one line. `None` when input is closed or unreadable.
    pub(super) fn ask(&mut self, prompt: &str) -> Option<String> {
        match self.prompter.read_line(prompt) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read operator input");
                None
            }
        }
    }

    /// Stream one command with the standard banner, status line, and separator.
    pub(super) async fn run_step(&self, spec: &CommandSpec) -> RunOutcome {
        self.sink.command_banner(&spec.display());
        let outcome = self.runner.run(spec).await;
        match &outcome {
            RunOutcome::Succeeded => self.sink.success("Command finished."),
            RunOutcome::Failed { code: Some(code) } => self
                .sink
                .error(&format!("Command failed with exit code {code}")),
            RunOutcome::Failed { code: None } => {
                self.sink.error("Command terminated by a signal.")
            }
            RunOutcome::SpawnFailed { reason } => self
                .sink
                .error(&format!("Command could not be started: {reason}")),
            RunOutcome::Interrupted => self.sink.warn("Command interrupted."),
        }
        self.sink.separator();
        outcome
    }

    /// Run `steps` in order, stopping at the first one that does not succeed.
    pub(super) async fn run_steps(&self, steps: &[CommandSpec]) -> Result<(), ConsoleError> {
        for spec in steps {
            if let Some(err) = self.run_step(spec).await.into_error(spec) {
                return Err(err);
            }
        }
        Ok(())
    }
}
