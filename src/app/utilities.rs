//! System utilities submenu: GLIBC upgrade, swap file, reboot.

use std::path::Path;

use crate::error::ConsoleError;
use crate::extract::extract_glibc_version;
use crate::process::CommandSpec;

use super::menu::UtilityChoice;
use super::Console;

/// Only this GLIBC release is offered the upgrade.
pub const UPGRADABLE_GLIBC: &str = "2.35";
/// Word the operator must type to confirm the GLIBC upgrade.
pub const GLIBC_CONFIRM_WORD: &str = "AGREE";
pub const GLIBC_TARGET: &str = "glibc-2.39";
pub const GLIBC_PREFIX: &str = "/opt/glibc-2.39";
pub const SWAP_FILE: &str = "/swapfile";

/// Build steps for the GLIBC upgrade, run from `user_home`.
pub fn glibc_update_steps(user_home: &Path) -> Vec<CommandSpec> {
    let archive = format!("{GLIBC_TARGET}.tar.gz");
    let build = [
        format!("tar -zxvf {archive}"),
        format!("cd {GLIBC_TARGET}"),
        "mkdir -p glibc-build".to_string(),
        "cd glibc-build".to_string(),
        format!("../configure --prefix={GLIBC_PREFIX}"),
        "make -j$(nproc)".to_string(),
        "make install".to_string(),
    ]
    .join(" && ");
    vec![
        CommandSpec::new("apt").arg("update"),
        CommandSpec::new("apt").args(["install", "-y", "gawk", "bison", "gcc", "make", "wget", "tar"]),
        CommandSpec::new("wget")
            .arg("-c")
            .arg(format!("https://ftp.gnu.org/gnu/glibc/{archive}"))
            .current_dir(user_home),
        CommandSpec::shell(build).current_dir(user_home),
    ]
}

/// Swap size for a submenu answer (`1`, `2`, `3`).
pub fn swap_size(choice: &str) -> Option<&'static str> {
    match choice.trim() {
        "1" => Some("4G"),
        "2" => Some("8G"),
        "3" => Some("16G"),
        _ => None,
    }
}

/// Create, format, and enable the swap file, then register it in fstab.
pub fn swap_steps(size: &str) -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("fallocate").args(["-l", size, SWAP_FILE]),
        CommandSpec::new("chmod").args(["600", SWAP_FILE]),
        CommandSpec::new("mkswap").arg(SWAP_FILE),
        CommandSpec::new("swapon").arg(SWAP_FILE),
        CommandSpec::shell(format!(
            "echo '{SWAP_FILE} none swap sw 0 0' | tee -a /etc/fstab"
        )),
    ]
}

fn confirmed(answer: Option<String>) -> bool {
    answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"))
}

impl Console {
    /// Submenu loop; returns on "back" or closed input.
    pub async fn utilities_menu(&mut self) {
        loop {
            self.sink.clear();
            self.sink.rule();
            self.sink.section("SYSTEM UTILITIES");
            self.sink.rule();
            self.sink.menu_item("1", "Check & update GLIBC version");
            self.sink.menu_item("2", "Fix killed processes (create swap)");
            self.sink.menu_item("3", "Reboot");
            self.sink.menu_item("4", "Back to main menu");

            let Some(answer) = self.ask("Enter your choice [1-4]: ") else {
                return;
            };
            let result = match UtilityChoice::parse(&answer) {
                Some(UtilityChoice::Glibc) => self.manage_glibc().await,
                Some(UtilityChoice::Swap) => self.manage_swap().await,
                Some(UtilityChoice::Reboot) => self.reboot().await,
                Some(UtilityChoice::Back) => return,
                None => Err(ConsoleError::InvalidInput(format!(
                    "`{}` is not a menu choice",
                    answer.trim()
                ))),
            };
            if let Err(err) = result {
                self.report(&err);
            }
            if self
                .ask("\nPress [Enter] to return to the utilities menu...")
                .is_none()
            {
                return;
            }
        }
    }

    /// Detect the GLIBC version and offer the upgrade on the one affected release.
    pub async fn manage_glibc(&mut self) -> Result<(), ConsoleError> {
        self.sink.section("Checking GLIBC version");
        let ldd_version = CommandSpec::new("ldd").arg("--version");
        let output = self.runner.capture(&ldd_version).await?;
        if !output.success() {
            return Err(ConsoleError::CommandFailed {
                command: ldd_version.display(),
                code: Some(output.exit_code),
            });
        }
        let version = extract_glibc_version(&output.stdout).ok_or_else(|| ConsoleError::ParseMiss {
            what: "GLIBC version".into(),
        })?;
        self.sink.field("Detected GLIBC version", &version);

        if version != UPGRADABLE_GLIBC {
            self.sink.success(&format!(
                "GLIBC is not {UPGRADABLE_GLIBC}. No action needed."
            ));
            return Ok(());
        }

        self.sink.rule();
        self.sink.warn("STRONG WARNING");
        self.sink.rule();
        self.sink
            .warn("Changing GLIBC is VERY RISKY and can break your system.");
        self.sink
            .warn("Continue only if you know what you are doing.");
        let answer = self.ask(&format!(
            "\nUpgrade to GLIBC 2.39? (type '{GLIBC_CONFIRM_WORD}'): "
        ));
        if answer.as_deref() != Some(GLIBC_CONFIRM_WORD) {
            self.sink.error("Update cancelled.");
            return Ok(());
        }

        self.sink
            .success("Confirmation accepted. Starting GLIBC update...");
        for spec in glibc_update_steps(self.user_home()) {
            self.run_step(&spec).await;
        }
        self.sink
            .success("GLIBC update finished. Rebooting the system is recommended.");
        Ok(())
    }

    /// Create and enable a swap file of an operator-chosen size.
    pub async fn manage_swap(&mut self) -> Result<(), ConsoleError> {
        self.sink.section("Managing swap file");
        self.sink
            .detail("A swap file helps hosts with limited RAM avoid killed processes.");
        self.sink.menu_item("1", "4G (hosts with 4GB RAM or less)");
        self.sink.menu_item("2", "8G (hosts with 8GB RAM)");
        self.sink.menu_item("3", "16G (hosts with 16GB RAM or more)");

        let answer = self.ask("Enter your choice [1-3]: ").unwrap_or_default();
        let size = swap_size(&answer).ok_or_else(|| {
            ConsoleError::InvalidInput(format!("`{}` is not a swap size choice", answer.trim()))
        })?;

        let confirm = self.ask(&format!("Create a {size} swap file? (y/n): "));
        if !confirmed(confirm) {
            self.sink.error("Swap creation cancelled.");
            return Ok(());
        }

        self.run_steps(&swap_steps(size)).await?;
        self.sink
            .success(&format!("Swap file of {size} created and enabled."));
        Ok(())
    }

    pub async fn reboot(&mut self) -> Result<(), ConsoleError> {
        self.sink.section("Reboot");
        self.sink
            .warn("This reboots the host. Unsaved work in all sessions is lost.");
        if !confirmed(self.ask("Are you sure you want to continue? (y/n): ")) {
            self.sink.success("Reboot cancelled.");
            return Ok(());
        }
        self.sink.error("Reboot command sent...");
        self.run_step(&CommandSpec::new("reboot")).await;
        Ok(())
    }
}
