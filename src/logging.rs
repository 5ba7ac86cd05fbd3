//! Diagnostic logging setup.
//!
//! Operator-facing text goes through `ui::RenderSink`; this is only for
//! `tracing` diagnostics on stderr.

use tracing_subscriber::EnvFilter;

/// Env var checked before `RUST_LOG`.
pub const LOG_ENV: &str = "NEXUS_TOOL_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Pick the filter directive: `NEXUS_TOOL_LOG`, then `RUST_LOG`, then `warn`.
pub fn filter_directive<FEnv>(env_lookup: FEnv) -> String
where
    FEnv: Fn(&str) -> Option<String>,
{
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|name| env_lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Install the global stderr subscriber. Safe to call more than once.
pub fn init(color: bool) {
    let directive = filter_directive(|name| std::env::var(name).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("warning: ignoring invalid log filter `{directive}`: {err}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .try_init();
}
