//! Executable discovery for the external tools the console drives.
//!
//! Resolution never fails: an unresolved tool is `None`, and callers turn
//! that into a `ToolUnavailable` message naming the menu action to run first.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Standard binary directories searched in addition to `PATH`.
pub const FALLBACK_BIN_DIRS: [&str; 6] = [
    "/usr/bin",
    "/bin",
    "/usr/local/bin",
    "/sbin",
    "/usr/sbin",
    "/snap/bin",
];

/// Resolve `command` against the live `PATH`, the standard binary directories,
/// `<user_home>/.local/bin`, and finally the system `which` utility.
pub fn find_executable(command: &str, user_home: Option<&Path>) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH");
    let fallback = FALLBACK_BIN_DIRS.map(PathBuf::from);
    find_executable_with(
        command,
        user_home,
        path_var.as_deref(),
        &fallback,
        which_lookup,
    )
}

/// Resolution with injectable search inputs.
pub fn find_executable_with<FWhich>(
    command: &str,
    user_home: Option<&Path>,
    path_var: Option<&OsStr>,
    fallback_dirs: &[PathBuf],
    which: FWhich,
) -> Option<PathBuf>
where
    FWhich: Fn(&str) -> Option<String>,
{
    let direct = Path::new(command);
    if direct.is_absolute() && is_executable(direct) {
        return Some(direct.to_path_buf());
    }

    for dir in candidate_dirs(path_var, fallback_dirs, user_home) {
        let candidate = dir.join(command);
        if is_executable(&candidate) {
            tracing::debug!(command, path = %candidate.display(), "resolved executable");
            return Some(candidate);
        }
    }

    let looked_up = which(command)?;
    let looked_up = PathBuf::from(looked_up.trim());
    if is_executable(&looked_up) {
        tracing::debug!(command, path = %looked_up.display(), "resolved executable via which");
        Some(looked_up)
    } else {
        tracing::debug!(command, "executable not found");
        None
    }
}

/// Ordered, de-duplicated search directories.
///
/// Sorting keeps resolution reproducible regardless of `PATH` ordering.
pub fn candidate_dirs(
    path_var: Option<&OsStr>,
    fallback_dirs: &[PathBuf],
    user_home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut dirs = BTreeSet::new();
    if let Some(raw) = path_var {
        dirs.extend(
            std::env::split_paths(raw).filter(|dir| !dir.as_os_str().is_empty()),
        );
    }
    dirs.extend(fallback_dirs.iter().cloned());
    if let Some(home) = user_home {
        dirs.insert(home.join(".local").join("bin"));
    }
    dirs.into_iter().collect()
}

/// True when `path` is a regular file with at least one execute bit set.
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn which_lookup(command: &str) -> Option<String> {
    let output = Command::new("which").arg(command).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use std::ffi::OsString;

    fn no_which(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn absolute_executable_path_is_returned_unchanged() {
        let tmp = TestTempDir::new("resolve-abs");
        let tool = tmp.write_executable("bin/nexus-network", "#!/bin/sh\nexit 0\n");
        let command = tool.display().to_string();

        let resolved = find_executable_with(&command, None, None, &[], |_| {
            panic!("which must not be consulted for an absolute executable path")
        });
        assert_eq!(resolved, Some(tool));
    }

    #[test]
    fn finds_tool_in_fallback_directory() {
        let tmp = TestTempDir::new("resolve-fallback");
        let tool = tmp.write_executable("sbin/screen", "#!/bin/sh\n");
        let fallback = vec![tmp.child("empty"), tmp.child("sbin")];

        let resolved = find_executable_with("screen", None, None, &fallback, no_which);
        assert_eq!(resolved, Some(tool));
    }

    #[test]
    fn skips_files_without_execute_bit() {
        let tmp = TestTempDir::new("resolve-noexec");
        tmp.write_text("a/screen", "not executable");
        let tool = tmp.write_executable("b/screen", "#!/bin/sh\n");
        let fallback = vec![tmp.child("a"), tmp.child("b")];

        let resolved = find_executable_with("screen", None, None, &fallback, no_which);
        assert_eq!(resolved, Some(tool));
    }

    #[test]
    fn user_local_bin_is_searched_when_home_is_given() {
        let tmp = TestTempDir::new("resolve-home");
        let home = tmp.child("home/alice");
        let tool = tmp.write_executable("home/alice/.local/bin/nexus-network", "#!/bin/sh\n");

        assert_eq!(
            find_executable_with("nexus-network", Some(&home), None, &[], no_which),
            Some(tool)
        );
        assert_eq!(
            find_executable_with("nexus-network", None, None, &[], no_which),
            None
        );
    }

    #[test]
    fn resolution_is_deterministic_across_path_orderings() {
        let tmp = TestTempDir::new("resolve-determinism");
        tmp.write_executable("x/tool", "#!/bin/sh\n");
        tmp.write_executable("y/tool", "#!/bin/sh\n");
        let forward = std::env::join_paths([tmp.child("x"), tmp.child("y")]).expect("join");
        let reverse = std::env::join_paths([tmp.child("y"), tmp.child("x")]).expect("join");

        let first = find_executable_with("tool", None, Some(&forward), &[], no_which);
        for _ in 0..3 {
            assert_eq!(
                find_executable_with("tool", None, Some(&forward), &[], no_which),
                first
            );
        }
        assert_eq!(
            find_executable_with("tool", None, Some(&reverse), &[], no_which),
            first
        );
        assert_eq!(first, Some(tmp.child("x/tool")));
    }

    #[test]
    fn falls_back_to_which_output_when_it_names_an_executable() {
        let tmp = TestTempDir::new("resolve-which");
        let tool = tmp.write_executable("opt/screen", "#!/bin/sh\n");
        let reported = format!("{}\n", tool.display());

        let resolved = find_executable_with("screen", None, None, &[], |_| Some(reported.clone()));
        assert_eq!(resolved, Some(tool));
    }

    #[test]
    fn which_output_naming_a_missing_file_is_absent() {
        let resolved = find_executable_with("screen", None, None, &[], |_| {
            Some("/definitely/not/here/screen".to_string())
        });
        assert_eq!(resolved, None);
    }

    #[test]
    fn candidate_dirs_are_sorted_and_deduplicated() {
        let path_var = OsString::from("/usr/bin::/opt/tools:/bin");
        let fallback = vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")];
        let dirs = candidate_dirs(Some(&path_var), &fallback, Some(Path::new("/home/bob")));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/bin"),
                PathBuf::from("/home/bob/.local/bin"),
                PathBuf::from("/opt/tools"),
                PathBuf::from("/usr/bin"),
            ]
        );
    }
}
