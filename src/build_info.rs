//! Compile-time build metadata exposed to the banner and `--version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("NEXUS_TOOL_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("NEXUS_TOOL_BUILD_TIMESTAMP");

/// Short banner title shown above the startup choice.
pub fn banner_title() -> String {
    format!("Nexus Node Tool v{VERSION}")
}

/// Render CLI version block used by `nexus-tool --version`.
pub fn cli_version_text() -> String {
    format!("nexus-tool {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_title_carries_package_version() {
        assert!(banner_title().ends_with(VERSION));
    }

    #[test]
    fn cli_version_text_includes_expected_lines() {
        let text = cli_version_text();
        assert!(text.starts_with("nexus-tool "));
        assert!(text.contains("commit:"));
        assert!(text.contains("built:"));
    }
}
