//! Operator settings data model.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_CLI_INSTALLER_URL, DEFAULT_MAX_THREADS, DEFAULT_MULTIPLEXER, DEFAULT_NODE_CLIENT,
    DEFAULT_TOOLCHAIN_TARGET,
};

/// Top-level operator settings (`nexus-tool.toml`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub tools: ToolsSettings,
    pub node: NodeSettings,
    pub install: InstallSettings,
    pub display: DisplaySettings,
    pub state: StateSettings,
}

/// External executables, by name or absolute path.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsSettings {
    pub multiplexer: String,
    pub node_client: String,
}

impl Default for ToolsSettings {
    fn default() -> Self {
        Self {
            multiplexer: DEFAULT_MULTIPLEXER.into(),
            node_client: DEFAULT_NODE_CLIENT.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NodeSettings {
    /// Thread cap for capped background runs. Clamped to at least 1.
    pub max_threads: u32,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            max_threads: DEFAULT_MAX_THREADS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallSettings {
    pub cli_installer_url: String,
    pub toolchain_target: String,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            cli_installer_url: DEFAULT_CLI_INSTALLER_URL.into(),
            toolchain_target: DEFAULT_TOOLCHAIN_TARGET.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Location of the persisted identity record.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StateSettings {
    /// Overrides `<home>/.nexus_tool_config.json` when set.
    pub file: Option<PathBuf>,
}

/// Settings plus non-fatal problems found while loading them.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
    /// Operator-facing warnings (bad file, bad env value).
    pub warnings: Vec<String>,
}
