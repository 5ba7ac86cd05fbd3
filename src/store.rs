//! Persisted operator identity (wallet address + node ID).
//!
//! One JSON dotfile in the invoking user's home, fully rewritten on each save.
//! Loading never fails the caller: a missing or malformed file yields an empty
//! record and a status the console can report.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// File name of the persisted record under the user's home directory.
pub const STATE_FILE_NAME: &str = ".nexus_tool_config.json";

/// Identity values remembered across runs. Both fields are independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
}

/// Result of reading the record at startup.
#[derive(Debug)]
pub enum LoadStatus {
    /// No file yet; defaults in use.
    Missing,
    /// File parsed successfully.
    Loaded,
    /// File existed but could not be read or parsed; defaults in use.
    Failed(StoreError),
}

/// Single-writer owner of the persisted record file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at `<home>/.nexus_tool_config.json`.
    pub fn for_user_home(home: &Path) -> Self {
        Self::at(home.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, falling back to defaults on any error.
    pub fn load(&self) -> PersistedConfig {
        self.load_with_status().0
    }

    /// Load the record and report how it went.
    pub fn load_with_status(&self) -> (PersistedConfig, LoadStatus) {
        match self.try_load() {
            Ok(Some(config)) => (config, LoadStatus::Loaded),
            Ok(None) => (PersistedConfig::default(), LoadStatus::Missing),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to load persisted config");
                (PersistedConfig::default(), LoadStatus::Failed(err))
            }
        }
    }

    fn try_load(&self) -> Result<Option<PersistedConfig>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Overwrite the file with a pretty-printed rendering of `config`.
    pub fn save(&self, config: &PersistedConfig) -> Result<(), StoreError> {
        let text = render_pretty(config)?;
        std::fs::write(&self.path, text).map_err(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to save persisted config");
            StoreError::Io(err)
        })
    }
}

fn render_pretty(config: &PersistedConfig) -> Result<String, StoreError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    config.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(String::from_utf8_lossy(&out).into_owned())
}
