//! Operator settings and invoking-user resolution.
//!
//! Settings are loaded in this order of precedence (highest wins):
//! 1. Environment variables (`NEXUS_TOOL_MULTIPLEXER`, `NEXUS_TOOL_NODE_CLIENT`,
//!    `NEXUS_TOOL_MAX_THREADS`, `NEXUS_TOOL_STATE_FILE`)
//! 2. TOML file given via `--settings`
//! 3. `<home>/.config/nexus-tool/nexus-tool.toml`
//! 4. Built-in defaults
//!
//! Unlike the persisted identity record, settings are never written by the
//! console.

mod defaults;
mod env;
pub mod home;
mod loader;
mod types;

pub use home::invoking_user_home;
pub use loader::{default_settings_path, load_settings};
pub use types::{
    DisplaySettings, InstallSettings, LoadedSettings, NodeSettings, Settings, StateSettings,
    ToolsSettings,
};
