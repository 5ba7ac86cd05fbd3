//! Environment overrides for operator settings.
//!
//! `NEXUS_TOOL_*` variables win over the settings file. Invalid values are
//! reported as warnings and leave the file/default value in place.

use std::path::PathBuf;

use super::Settings;

pub(super) fn apply_env_overrides<FEnv>(
    settings: &mut Settings,
    env_lookup: &FEnv,
    warnings: &mut Vec<String>,
) where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(value) = non_empty(env_lookup, "NEXUS_TOOL_MULTIPLEXER") {
        settings.tools.multiplexer = value;
    }
    if let Some(value) = non_empty(env_lookup, "NEXUS_TOOL_NODE_CLIENT") {
        settings.tools.node_client = value;
    }
    if let Some(value) = non_empty(env_lookup, "NEXUS_TOOL_MAX_THREADS") {
        match value.parse::<u32>() {
            // Clamp to at least one thread.
            Ok(parsed) => settings.node.max_threads = parsed.max(1),
            Err(_) => warnings.push(format!(
                "ignoring NEXUS_TOOL_MAX_THREADS=`{value}`: expected a positive integer"
            )),
        }
    }
    if let Some(value) = non_empty(env_lookup, "NEXUS_TOOL_STATE_FILE") {
        settings.state.file = Some(PathBuf::from(value));
    }
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
