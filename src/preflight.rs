//! Startup checks and the dependency status report.

use std::path::{Path, PathBuf};

use crate::resolve::is_executable;

/// Refuse to run without root privileges.
pub fn ensure_elevated() -> Result<(), String> {
    check_elevated(unsafe { libc::geteuid() })
}

fn check_elevated(euid: u32) -> Result<(), String> {
    if euid == 0 {
        return Ok(());
    }
    let program = std::env::args()
        .next()
        .map(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(arg)
        })
        .unwrap_or_else(|| "nexus-tool".to_string());
    Err(format!(
        "this tool must be run as root. Try again with: sudo {program}"
    ))
}

/// One line of the dependency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStatus {
    pub name: String,
    /// Resolved executable, or `None` when missing.
    pub path: Option<PathBuf>,
    /// Remediation shown when missing.
    pub hint: &'static str,
}

impl DependencyStatus {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

pub const MULTIPLEXER_HINT: &str = "Install it with 'apt install screen'.";
pub const TOOLCHAIN_HINT: &str = "Run the initial setup first.";
pub const NODE_CLIENT_HINT: &str = "Run 'Update Nexus CLI' (main menu -> 2).";

/// Toolchain compiler installed by rustup for the invoking user.
pub fn rustc_path(user_home: &Path) -> PathBuf {
    user_home.join(".cargo").join("bin").join("rustc")
}

/// Build the report from already-resolved tool paths.
pub fn dependency_report(
    multiplexer_name: &str,
    multiplexer: Option<&Path>,
    node_client_name: &str,
    node_client: Option<&Path>,
    user_home: &Path,
) -> Vec<DependencyStatus> {
    let rustc = rustc_path(user_home);
    vec![
        DependencyStatus {
            name: multiplexer_name.to_string(),
            path: multiplexer.map(Path::to_path_buf),
            hint: MULTIPLEXER_HINT,
        },
        DependencyStatus {
            name: "rustc".to_string(),
            path: is_executable(&rustc).then_some(rustc),
            hint: TOOLCHAIN_HINT,
        },
        DependencyStatus {
            name: node_client_name.to_string(),
            path: node_client.filter(|path| is_executable(path)).map(Path::to_path_buf),
            hint: NODE_CLIENT_HINT,
        },
    ]
}
