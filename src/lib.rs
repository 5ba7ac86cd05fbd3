//! nexus-tool: an operator console for installing, configuring, and
//! supervising a Nexus prover node on a Linux host.
//!
//! The console drives external programs (the `nexus-network` node client,
//! GNU `screen`, apt, rustup) and keeps a small identity record (wallet
//! address, node ID) in the invoking user's home.
//!
//! # Quick start
//!
//! ```no_run
//! use nexus_tool::app::Console;
//! use nexus_tool::config::{invoking_user_home, load_settings};
//! use nexus_tool::process::SystemRunner;
//! use nexus_tool::ui::{Renderer, StdinPrompter};
//!
//! # async fn example() {
//! let home = invoking_user_home();
//! let loaded = load_settings(None, &home);
//! let mut console = Console::new(
//!     home,
//!     loaded.settings,
//!     Box::new(Renderer::new(true)),
//!     Box::new(StdinPrompter::new(true)),
//!     Box::new(SystemRunner::new()),
//! );
//! console.load_state();
//! console.run_menu().await;
//! # }
//! ```

pub mod app;
pub mod build_info;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod multiplexer;
pub mod node;
pub mod preflight;
pub mod process;
pub mod resolve;
pub mod store;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
