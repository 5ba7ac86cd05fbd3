//! First-time host setup: system packages, toolchain, node client.

use std::path::Path;

use crate::error::ConsoleError;
use crate::process::CommandSpec;

use super::Console;

/// Installer pipeline for the language toolchain.
pub const TOOLCHAIN_INSTALLER: &str =
    "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y";

/// System package steps. Failures here are reported but do not stop setup.
pub fn package_steps() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("apt").arg("update"),
        CommandSpec::new("apt").args(["upgrade", "-y"]),
        CommandSpec::new("apt").args([
            "install",
            "screen",
            "curl",
            "build-essential",
            "pkg-config",
            "libssl-dev",
            "git-all",
            "-y",
        ]),
        CommandSpec::new("apt").args(["install", "protobuf-compiler", "-y"]),
        CommandSpec::new("apt").arg("update"),
    ]
}

pub fn toolchain_install_step() -> CommandSpec {
    CommandSpec::shell(TOOLCHAIN_INSTALLER)
}

/// `rustup target add <target>` with `<home>/.cargo/bin` first on `PATH`.
pub fn toolchain_target_step(user_home: &Path, target: &str, current_path: Option<&str>) -> CommandSpec {
    let cargo_bin = user_home.join(".cargo").join("bin");
    let path = match current_path.filter(|path| !path.is_empty()) {
        Some(rest) => format!("{}:{rest}", cargo_bin.display()),
        None => cargo_bin.display().to_string(),
    };
    CommandSpec::new("rustup")
        .args(["target", "add", target])
        .env("PATH", path)
}

impl Console {
    /// Run the whole first-time setup.
    ///
    /// Only a failed toolchain install is an error; the caller exits on it.
    pub async fn initial_setup(&mut self) -> Result<(), ConsoleError> {
        self.sink
            .section("Starting initial installation and dependency setup");
        for spec in package_steps() {
            self.run_step(&spec).await;
        }

        self.sink.warn("The Rust toolchain will be installed.");
        let installer = toolchain_install_step();
        if let Some(err) = self.run_step(&installer).await.into_error(&installer) {
            return Err(err);
        }

        let current_path = std::env::var("PATH").ok();
        let target = toolchain_target_step(
            self.user_home(),
            &self.settings().install.toolchain_target,
            current_path.as_deref(),
        );
        self.run_step(&target).await;

        self.sink.activity("Installing Nexus CLI");
        self.update_cli().await?;

        self.sink
            .success("Initial setup complete. Run the tool again to enter the main menu.");
        Ok(())
    }
}
