//! Settings loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

use super::defaults::{SETTINGS_DIR, SETTINGS_FILE};
use super::env::apply_env_overrides;
use super::{LoadedSettings, Settings};

/// Default settings path: `<home>/.config/nexus-tool/nexus-tool.toml`.
pub fn default_settings_path(user_home: &Path) -> PathBuf {
    user_home.join(SETTINGS_DIR).join(SETTINGS_FILE)
}

/// Load settings from disk and environment. Never fails; problems become warnings.
///
/// `path_override` is an explicit settings path (from `--settings`).
pub fn load_settings(path_override: Option<&Path>, user_home: &Path) -> LoadedSettings {
    load_settings_from_sources(
        path_override,
        user_home,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
    )
}

pub(super) fn load_settings_from_sources<FRead, FEnv>(
    path_override: Option<&Path>,
    user_home: &Path,
    read_file: FRead,
    env_lookup: FEnv,
) -> LoadedSettings
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let path = path_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_settings_path(user_home));

    let (mut settings, source) = match read_settings_file(&path, &read_file) {
        Ok(Some(settings)) => (settings, Some(path)),
        Ok(None) => {
            if path_override.is_some() {
                warnings.push(format!(
                    "settings file `{}` does not exist; using defaults",
                    path.display()
                ));
            }
            (Settings::default(), None)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
            warnings.push(format!(
                "failed to load settings from `{}`: {err}; using defaults",
                path.display()
            ));
            (Settings::default(), None)
        }
    };

    apply_env_overrides(&mut settings, &env_lookup, &mut warnings);
    settings.node.max_threads = settings.node.max_threads.max(1);

    LoadedSettings {
        settings,
        source,
        warnings,
    }
}

fn read_settings_file<FRead>(path: &Path, read_file: &FRead) -> Result<Option<Settings>, SettingsError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
{
    let text = match read_file(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SettingsError::Io(err)),
    };
    let settings: Settings = toml::from_str(&text)?;
    validate(&settings)?;
    Ok(Some(settings))
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.tools.multiplexer.trim().is_empty() {
        return Err(SettingsError::Invalid(
            "tools.multiplexer cannot be empty".into(),
        ));
    }
    if settings.tools.node_client.trim().is_empty() {
        return Err(SettingsError::Invalid(
            "tools.node_client cannot be empty".into(),
        ));
    }
    Ok(())
}
