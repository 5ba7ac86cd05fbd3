//! Startup choice, main menu loop, and choice dispatch.

use crate::build_info;
use crate::error::ConsoleError;
use crate::node::LaunchMode;

use super::Console;

/// First prompt after launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupChoice {
    Setup,
    Menu,
}

impl StartupChoice {
    /// `1` selects setup; anything else goes to the main menu.
    pub fn parse(answer: &str) -> Self {
        if answer.trim() == "1" {
            Self::Setup
        } else {
            Self::Menu
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    Status,
    UpdateCli,
    RegisterWallet,
    CreateNodeId,
    RunForeground,
    RunBackground,
    RunBackgroundCapped,
    ViewSessions,
    StopSession,
    Utilities,
    Exit,
}

impl MainMenuChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        let choice = match answer.trim() {
            "1" => Self::Status,
            "2" => Self::UpdateCli,
            "3" => Self::RegisterWallet,
            "4" => Self::CreateNodeId,
            "5" => Self::RunForeground,
            "6" => Self::RunBackground,
            "6b" | "6B" => Self::RunBackgroundCapped,
            "7" => Self::ViewSessions,
            "8" => Self::StopSession,
            "9" => Self::Utilities,
            "10" => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityChoice {
    Glibc,
    Swap,
    Reboot,
    Back,
}

impl UtilityChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Self::Glibc),
            "2" => Some(Self::Swap),
            "3" => Some(Self::Reboot),
            "4" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Whether the main loop keeps going after a dispatched choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Exit,
}

impl Console {
    /// Show the welcome banner and ask for setup vs. main menu.
    pub fn ask_startup_choice(&mut self) -> StartupChoice {
        self.sink.rule();
        self.sink.section(&build_info::banner_title());
        self.sink.rule();
        self.sink.activity("Choose an option:");
        self.sink
            .menu_item("1", "[INITIAL SETUP] (run this the first time)");
        self.sink
            .menu_item("2", "[MAIN MENU] (go straight to node management)");
        let answer = self.ask("Enter your choice (1/2): ").unwrap_or_default();
        StartupChoice::parse(&answer)
    }

    /// Main menu loop. Returns on "exit" or when input closes.
    pub async fn run_menu(&mut self) {
        loop {
            // The node client may have been installed since the last pass.
            self.refresh_node_client();

            if self.ask("\nPress [Enter] to show the menu...").is_none() {
                break;
            }
            self.sink.clear();
            self.render_main_menu();

            let Some(answer) = self.ask("Enter your choice [1-10]: ") else {
                break;
            };
            let Some(choice) = MainMenuChoice::parse(&answer) else {
                self.sink.error("Invalid choice. Please try again.");
                continue;
            };
            if self.dispatch(choice).await == MenuFlow::Exit {
                break;
            }
        }
        self.sink.success("Goodbye!");
    }

    /// Run one main-menu action and report any failure.
    pub async fn dispatch(&mut self, choice: MainMenuChoice) -> MenuFlow {
        tracing::debug!(?choice, "menu choice");
        let result = match choice {
            MainMenuChoice::Status => {
                self.check_status();
                Ok(())
            }
            MainMenuChoice::UpdateCli => self.update_cli().await,
            MainMenuChoice::RegisterWallet => self.register_wallet().await,
            MainMenuChoice::CreateNodeId => self.create_node_id().await,
            MainMenuChoice::RunForeground => self.start_node(LaunchMode::Foreground).await,
            MainMenuChoice::RunBackground => {
                self.start_node(LaunchMode::Background { max_threads: None })
                    .await
            }
            MainMenuChoice::RunBackgroundCapped => {
                let max_threads = Some(self.settings().node.max_threads);
                self.start_node(LaunchMode::Background { max_threads }).await
            }
            MainMenuChoice::ViewSessions => self.view_sessions().await,
            MainMenuChoice::StopSession => self.stop_session().await,
            MainMenuChoice::Utilities => {
                self.utilities_menu().await;
                Ok(())
            }
            MainMenuChoice::Exit => return MenuFlow::Exit,
        };
        if let Err(err) = result {
            self.report(&err);
        }
        MenuFlow::Continue
    }

    /// Render an operator-facing failure.
    pub fn report(&self, err: &ConsoleError) {
        tracing::debug!(error = %err, "action failed");
        self.sink.error(&err.to_string());
    }

    fn render_main_menu(&self) {
        self.sink.rule();
        self.sink.section("NEXUS MANAGEMENT MENU");
        self.sink.rule();
        self.render_saved_identity();
        self.sink.rule();
        self.sink.activity("Choose an action:");
        let capped = format!(
            "Run node with max threads ({}) in the background",
            self.settings().node.max_threads
        );
        let entries = [
            ("1", "Check dependency status"),
            ("2", "Update Nexus CLI"),
            ("3", "Register/update wallet address"),
            ("4", "Create/update node ID"),
            ("5", "Run node (foreground)"),
            ("6", "Run node (background)"),
            ("6b", capped.as_str()),
            ("7", "View sessions (logs)"),
            ("8", "Stop a session"),
            ("9", "System utilities"),
            ("10", "Exit"),
        ];
        for (key, label) in entries {
            self.sink.menu_item(key, label);
        }
    }
}
