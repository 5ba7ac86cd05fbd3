//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Operator console for a Nexus prover node. Run with sudo.
#[derive(Debug, Parser)]
#[command(name = "nexus-tool", disable_version_flag = true)]
pub struct Args {
    /// Path to settings file (default: ~/.config/nexus-tool/nexus-tool.toml).
    #[arg(short = 's', long = "settings")]
    pub settings: Option<PathBuf>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print version, commit, and build time, then exit.
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run first-time installation, then exit.
    Setup,
    /// Go straight to the main menu.
    Menu,
}
