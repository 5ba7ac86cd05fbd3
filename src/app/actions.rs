//! Main-menu actions: identity registration, node launch, and sessions.

use crate::error::ConsoleError;
use crate::extract::extract_node_id;
use crate::multiplexer::{parse_selection, random_session_name, Multiplexer, Selection};
use crate::node::{resolve_node_id, validate_wallet_address, LaunchMode, NodeIdPrompt};
use crate::preflight::dependency_report;
use crate::process::{CommandSpec, RunOutcome};
use crate::ui::settings::NOT_SET;

use super::Console;

impl Console {
    /// Report which external tools are present.
    pub fn check_status(&self) {
        self.sink.section("Checking dependency status");
        let report = dependency_report(
            &self.settings().tools.multiplexer,
            self.multiplexer().map(|mux| mux.path()),
            &self.settings().tools.node_client,
            self.node_client().map(|client| client.path()),
            self.user_home(),
        );
        for dep in report {
            match &dep.path {
                Some(path) => self
                    .sink
                    .field(&dep.name, &format!("found at {}", path.display())),
                None => self
                    .sink
                    .field(&dep.name, &format!("NOT FOUND. {}", dep.hint)),
            }
        }
    }

    /// Re-run the node-client installer.
    pub async fn update_cli(&mut self) -> Result<(), ConsoleError> {
        self.sink.section("Updating Nexus CLI");
        let spec = CommandSpec::shell(format!(
            "curl {} | sh",
            self.settings().install.cli_installer_url
        ));
        let outcome = self.run_step(&spec).await;
        self.refresh_node_client();
        if outcome.success() {
            self.sink
                .warn("Nexus CLI updated. Its path is re-detected before the next menu.");
        }
        Ok(())
    }

    /// Register a wallet address with the node client; persist it on success.
    pub async fn register_wallet(&mut self) -> Result<(), ConsoleError> {
        let client = self.require_node_client()?;
        self.sink.section("Wallet address registration");
        let answer = self.ask("Enter your wallet address: ").unwrap_or_default();
        let address = validate_wallet_address(&answer)?;

        let outcome = self.run_step(&client.register_user(&address)).await;
        if outcome.success() {
            self.persist(|state| state.wallet_address = Some(address.clone()));
            self.sink
                .success(&format!("Wallet address '{address}' saved."));
        }
        Ok(())
    }

    /// Register a new node and persist the ID parsed from the client output.
    pub async fn create_node_id(&mut self) -> Result<(), ConsoleError> {
        let client = self.require_node_client()?;
        self.sink.section("Creating a new node ID");
        let spec = client.register_node();
        self.sink.command_banner(&spec.display());

        let output = self.runner.capture(&spec).await?;
        if !output.success() {
            self.sink.detail(output.combined().trim_end());
            self.sink
                .warn("Failed to create node ID. Make sure your wallet is registered.");
            return Err(ConsoleError::CommandFailed {
                command: spec.display(),
                code: Some(output.exit_code),
            });
        }

        let combined = output.combined();
        self.sink.detail(combined.trim_end());
        match extract_node_id(&combined) {
            Some(id) => {
                self.persist(|state| state.node_id = Some(id.clone()));
                self.sink
                    .success(&format!("Node ID created and saved: {id}"));
                Ok(())
            }
            None => {
                tracing::warn!(output = %combined, "node ID pattern did not match register-node output");
                self.sink
                    .warn("Check the full output above for the node ID.");
                Err(ConsoleError::ParseMiss {
                    what: "node ID".into(),
                })
            }
        }
    }

    /// Start the node in the foreground or inside a detached session.
    pub async fn start_node(&mut self, mode: LaunchMode) -> Result<(), ConsoleError> {
        let multiplexer = match mode {
            LaunchMode::Background { .. } => Some(self.require_multiplexer()?),
            LaunchMode::Foreground => None,
        };
        let client = self.require_node_client()?;

        match mode {
            LaunchMode::Foreground => self.sink.section("Running node"),
            LaunchMode::Background { .. } => self.sink.section("Running node in the background"),
        }

        let saved = self.state().node_id.clone();
        if saved.is_none() {
            self.sink.warn("No node ID saved. Enter one manually.");
        }
        let node_id = resolve_node_id(saved.as_deref(), |prompt| {
            let text = match prompt {
                NodeIdPrompt::ConfirmSaved(id) => format!("Use saved node ID {id}? (Y/n): "),
                NodeIdPrompt::EnterReplacement => "Enter new node ID: ".to_string(),
                NodeIdPrompt::EnterManually => "Enter node ID: ".to_string(),
            };
            self.ask(&text)
        })?;

        let start = client.start(&node_id, mode.max_threads());
        match multiplexer {
            None => {
                self.sink.warn("Press Ctrl+C to stop the node.");
                if self.run_step(&start.interruptible()).await == RunOutcome::Interrupted {
                    self.sink.activity("Node stopped.");
                }
            }
            Some(mux) => {
                let capped = mode.max_threads().is_some();
                let name = random_session_name(&mut self.rng, capped);
                self.sink.field("Node ID", &node_id);
                self.sink.field("Session name", &name);
                let launch = mux.detached_launch_spec(&name, &start);
                if self.run_step(&launch).await.success() {
                    self.sink
                        .success(&format!("Node started in session '{name}'."));
                }
            }
        }
        Ok(())
    }

    /// List sessions and hand the terminal to the chosen one.
    pub async fn view_sessions(&mut self) -> Result<(), ConsoleError> {
        let mux = self.require_multiplexer()?;
        self.sink.section("Checking running sessions");
        let Some(session) = self
            .choose_session(&mux, "Choose a session to attach (number), or 'x' to go back: ")
            .await?
        else {
            return Ok(());
        };

        self.sink
            .success(&format!("Attaching to session '{session}'..."));
        self.sink.clear();
        let outcome = mux.attach(self.runner.as_ref(), &session).await;
        if let RunOutcome::SpawnFailed { reason } = &outcome {
            self.sink
                .error(&format!("Could not attach: {reason}"));
        }
        self.ask("\nBack from the session. Press [Enter] to continue.");
        Ok(())
    }

    /// List sessions and quit the chosen one.
    pub async fn stop_session(&mut self) -> Result<(), ConsoleError> {
        let mux = self.require_multiplexer()?;
        self.sink.section("Stopping a session");
        let Some(session) = self
            .choose_session(&mux, "Choose a session to stop (number), or 'x' to go back: ")
            .await?
        else {
            return Ok(());
        };

        let quit = mux.quit_spec(&session);
        if self.run_step(&quit).await.success() {
            self.sink
                .success(&format!("Session '{session}' stopped."));
        }
        Ok(())
    }

    /// Wallet and node ID lines shown at the top of the main menu.
    pub fn render_saved_identity(&self) {
        let state = self.state();
        self.sink.activity("Saved configuration:");
        self.sink.field(
            "Wallet Address",
            state.wallet_address.as_deref().unwrap_or(NOT_SET),
        );
        self.sink
            .field("Node ID", state.node_id.as_deref().unwrap_or(NOT_SET));
    }

    async fn choose_session(
        &mut self,
        mux: &Multiplexer,
        prompt: &str,
    ) -> Result<Option<String>, ConsoleError> {
        let sessions = mux.list(self.runner.as_ref()).await;
        if sessions.is_empty() {
            self.sink.warn("No sessions are running.");
            return Ok(None);
        }

        self.sink.success("Sessions found:");
        for (index, session) in sessions.iter().enumerate() {
            self.sink.menu_item(&(index + 1).to_string(), session);
        }

        let answer = self.ask(prompt).unwrap_or_default();
        match parse_selection(&answer, sessions.len()) {
            Selection::Cancel => Ok(None),
            Selection::Index(index) => Ok(Some(sessions[index].clone())),
            Selection::Invalid(reason) => Err(ConsoleError::InvalidInput(reason)),
        }
    }
}
