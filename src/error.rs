//! Unified error types for the console.

use std::fmt;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors when reading or writing the persisted identity record.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

/// Errors when loading operator settings.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ConsoleError: operator-facing failures
// ---------------------------------------------------------------------------

/// Failures surfaced to the operator. None of these end the menu loop.
#[derive(Debug)]
pub enum ConsoleError {
    /// A required executable could not be resolved.
    ToolUnavailable { tool: String, hint: String },
    /// An external command exited non-zero.
    CommandFailed { command: String, code: Option<i32> },
    /// An external command could not be started at all.
    SpawnFailed { command: String, reason: String },
    /// Expected pattern was not present in captured output.
    ParseMiss { what: String },
    /// Persisted record could not be read or written.
    ConfigIo(StoreError),
    /// Operator input was empty, non-numeric, or out of range.
    InvalidInput(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolUnavailable { tool, hint } => {
                write!(f, "command '{tool}' not found. {hint}")
            }
            Self::CommandFailed {
                command,
                code: Some(code),
            } => write!(f, "`{command}` failed with exit code {code}"),
            Self::CommandFailed { command, code: None } => {
                write!(f, "`{command}` terminated without an exit code")
            }
            Self::SpawnFailed { command, reason } => {
                write!(f, "could not start `{command}`: {reason}")
            }
            Self::ParseMiss { what } => write!(f, "{what} not found in output"),
            Self::ConfigIo(e) => write!(f, "configuration file: {e}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<StoreError> for ConsoleError {
    fn from(e: StoreError) -> Self {
        Self::ConfigIo(e)
    }
}
