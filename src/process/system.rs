//! `tokio::process` implementation of the command runner.

use async_trait::async_trait;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::{CommandRunner, CommandSpec, ExecOutput, RunOutcome};
use crate::error::ConsoleError;

/// Exit code a shell reports for a child ended by SIGINT.
const SIGINT_EXIT_CODE: i32 = 128 + libc::SIGINT;

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(spec.program());
    cmd.args(spec.get_args());
    if let Some(dir) = spec.get_current_dir() {
        cmd.current_dir(dir);
    }
    for (key, value) in spec.get_env() {
        cmd.env(key, value);
    }
    cmd.kill_on_drop(true);
    cmd
}

/// Ignores SIGINT in this process until dropped, then restores the previous
/// disposition.
///
/// Installed only after the child is spawned, so the child keeps the default
/// disposition and Ctrl+C from the terminal still reaches it.
struct SigintIgnored {
    previous: Option<libc::sighandler_t>,
}

impl SigintIgnored {
    fn install() -> Self {
        // SAFETY: swaps a process-wide disposition for a plain SIG_IGN.
        let previous = unsafe { libc::signal(libc::SIGINT, libc::SIG_IGN) };
        if previous == libc::SIG_ERR {
            tracing::warn!("could not ignore SIGINT for the foreground run");
            return Self { previous: None };
        }
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for SigintIgnored {
    fn drop(&mut self) {
        if let Some(previous) = self.previous {
            // SAFETY: restores the disposition returned by `install`.
            unsafe {
                libc::signal(libc::SIGINT, previous);
            }
        }
    }
}

fn interrupted_by_sigint(status: &ExitStatus) -> bool {
    status.signal() == Some(libc::SIGINT) || status.code() == Some(SIGINT_EXIT_CODE)
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> RunOutcome {
        let mut cmd = build_command(spec);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(command = %spec.display(), error = %err, "spawn failed");
                return RunOutcome::SpawnFailed {
                    reason: err.to_string(),
                };
            }
        };
        let _sigint = spec.is_interruptible().then(SigintIgnored::install);

        forward_lines(child.stdout.take(), child.stderr.take(), std::io::stdout()).await;

        match child.wait().await {
            Ok(status) if spec.is_interruptible() && interrupted_by_sigint(&status) => {
                RunOutcome::Interrupted
            }
            Ok(status) => RunOutcome::from_status(status),
            Err(err) => RunOutcome::SpawnFailed {
                reason: err.to_string(),
            },
        }
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<ExecOutput, ConsoleError> {
        let mut cmd = build_command(spec);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|err| ConsoleError::SpawnFailed {
            command: spec.display(),
            reason: err.to_string(),
        })?;

        Ok(ExecOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn interactive(&self, spec: &CommandSpec) -> RunOutcome {
        let mut cmd = build_command(spec);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        match cmd.status().await {
            Ok(status) => RunOutcome::from_status(status),
            Err(err) => RunOutcome::SpawnFailed {
                reason: err.to_string(),
            },
        }
    }
}

/// Copy lines from both child streams to `sink` as they arrive, until both
/// streams close.
async fn forward_lines<O, E, W>(stdout: Option<O>, stderr: Option<E>, mut sink: W)
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
    W: Write,
{
    let mut out = LinePump::new(stdout);
    let mut err = LinePump::new(stderr);
    while out.is_open() || err.is_open() {
        let line = tokio::select! {
            line = out.next_line(), if out.is_open() => line,
            line = err.next_line(), if err.is_open() => line,
        };
        if let Some(line) = line {
            write_line(&mut sink, &line);
        }
    }
}

fn write_line(sink: &mut impl Write, line: &str) {
    let _ = sink.write_all(line.as_bytes());
    if !line.ends_with('\n') {
        let _ = sink.write_all(b"\n");
    }
    let _ = sink.flush();
}

/// Line reader over one child stream.
///
/// The buffer lives outside the read future so a `select!` that drops the
/// future mid-line keeps the partial bytes.
struct LinePump<R> {
    reader: Option<BufReader<R>>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LinePump<R> {
    fn new(stream: Option<R>) -> Self {
        Self {
            reader: stream.map(BufReader::new),
            buf: Vec::new(),
        }
    }

    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    async fn next_line(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let read = reader.read_until(b'\n', &mut self.buf).await;
        match read {
            Ok(0) | Err(_) => self.reader = None,
            Ok(_) if !self.buf.ends_with(b"\n") => self.reader = None,
            Ok(_) => {}
        }
        if self.buf.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Some(line)
    }
}
