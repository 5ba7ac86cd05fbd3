//! Home directory of the user who invoked the console.
//!
//! The console runs under `sudo`, but state belongs to the login user, so
//! `SUDO_USER` is honoured before the process's own home.

use std::ffi::{CStr, CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Upper bound for the `getpwnam_r` scratch buffer.
const MAX_PASSWD_BUFFER: usize = 1 << 20;

/// Resolve the invoking user's home directory.
pub fn invoking_user_home() -> PathBuf {
    invoking_user_home_with(|name| std::env::var(name).ok(), user_home_dir, dirs::home_dir)
}

pub fn invoking_user_home_with<FEnv, FUser, FHome>(
    env_lookup: FEnv,
    user_home: FUser,
    process_home: FHome,
) -> PathBuf
where
    FEnv: Fn(&str) -> Option<String>,
    FUser: Fn(&str) -> Option<PathBuf>,
    FHome: Fn() -> Option<PathBuf>,
{
    if let Some(user) = env_lookup("SUDO_USER").filter(|user| !user.trim().is_empty()) {
        match user_home(user.trim()) {
            Some(home) => return home,
            None => tracing::debug!(user = %user, "SUDO_USER not found in passwd database"),
        }
    }
    process_home().unwrap_or_else(|| PathBuf::from("/root"))
}

/// Home directory of `user` from the system user database.
///
/// Goes through `getpwnam_r`, so NSS sources (LDAP, SSSD, systemd-homed) are
/// consulted as well as `/etc/passwd`.
pub fn user_home_dir(user: &str) -> Option<PathBuf> {
    let name = CString::new(user).ok()?;
    let mut buf: Vec<libc::c_char> = vec![0; initial_buffer_len()];
    loop {
        // SAFETY: `pwd` and `buf` outlive the call and `buf.len()` is its
        // real capacity; the returned strings point into `buf`.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut entry: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(
                name.as_ptr(),
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut entry,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_PASSWD_BUFFER {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
            continue;
        }
        if rc != 0 {
            tracing::debug!(user, code = rc, "getpwnam_r failed");
            return None;
        }
        if entry.is_null() || pwd.pw_dir.is_null() {
            return None;
        }
        // SAFETY: non-null `pw_dir` is a NUL-terminated string inside `buf`.
        let dir = unsafe { CStr::from_ptr(pwd.pw_dir) }.to_bytes();
        if dir.is_empty() {
            return None;
        }
        return Some(PathBuf::from(OsStr::from_bytes(dir)));
    }
}

fn initial_buffer_len() -> usize {
    // SAFETY: sysconf has no preconditions.
    let suggested = unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) };
    usize::try_from(suggested)
        .ok()
        .filter(|len| *len > 0)
        .unwrap_or(1024)
        .min(MAX_PASSWD_BUFFER)
}
