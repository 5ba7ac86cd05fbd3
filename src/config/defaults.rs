//! Default operator settings.

/// Multiplexer executable name searched for when none is configured.
pub(super) const DEFAULT_MULTIPLEXER: &str = "screen";
/// Node-client executable name searched for when none is configured.
pub(super) const DEFAULT_NODE_CLIENT: &str = "nexus-network";
/// Thread cap used by the "run with max threads" menu entry.
pub(super) const DEFAULT_MAX_THREADS: u32 = 4;
/// Node-client installer script URL.
pub(super) const DEFAULT_CLI_INSTALLER_URL: &str = "https://cli.nexus.xyz/";
/// Extra compilation target installed after the toolchain.
pub(super) const DEFAULT_TOOLCHAIN_TARGET: &str = "riscv32i-unknown-none-elf";

/// Settings directory under the user's home, relative path.
pub(super) const SETTINGS_DIR: &str = ".config/nexus-tool";
/// Settings file name inside `SETTINGS_DIR`.
pub(super) const SETTINGS_FILE: &str = "nexus-tool.toml";
