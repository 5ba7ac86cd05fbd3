//! Fake-tool harness for console flow integration tests.
//!
//! Each harness owns a temp directory holding shell-script stand-ins for the
//! node client and `screen`. Both scripts append their argv to a log file so
//! tests can assert on exactly what the console invoked.

use nexus_tool::app::Console;
use nexus_tool::config::Settings;
use nexus_tool::process::SystemRunner;
use nexus_tool::ui::{Prompter, RenderSink};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static HARNESS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp home with fake `nexus-network` and `screen` executables.
pub struct Harness {
    root: PathBuf,
    pub sink: RecordingSink,
}

impl Harness {
    pub fn new(scenario: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "nexus-tool-it-{scenario}-{}-{}",
            std::process::id(),
            HARNESS_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("bin")).expect("create harness bin dir");

        let harness = Self {
            root,
            sink: RecordingSink::default(),
        };
        harness.write_script("bin/nexus-network", &harness.node_client_script());
        harness.write_script("bin/screen", &harness.screen_script());
        harness
    }

    pub fn home(&self) -> &Path {
        &self.root
    }

    pub fn bin(&self, name: &str) -> PathBuf {
        self.root.join("bin").join(name)
    }

    /// Console wired to the fake tools and the real process runner.
    pub fn console(&self, answers: &[&str]) -> Console {
        let mut settings = Settings::default();
        settings.tools.node_client = self.bin("nexus-network").display().to_string();
        settings.tools.multiplexer = self.bin("screen").display().to_string();
        Console::new(
            self.home(),
            settings,
            Box::new(self.sink.clone()),
            Box::new(ScriptedAnswers::new(answers)),
            Box::new(SystemRunner::new()),
        )
    }

    /// Lines the fake node client was invoked with.
    pub fn node_client_calls(&self) -> Vec<String> {
        read_lines(&self.root.join("nexus-network.log"))
    }

    /// Lines the fake `screen` was invoked with.
    pub fn screen_calls(&self) -> Vec<String> {
        read_lines(&self.root.join("screen.log"))
    }

    /// Text the fake `screen -ls` prints next.
    pub fn set_session_listing(&self, listing: &str) {
        fs::write(self.root.join("sessions.txt"), listing).expect("write listing");
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join(".nexus_tool_config.json")
    }

    fn node_client_script(&self) -> String {
        format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{log}'\n\
             case \"$1\" in\n\
             register-user) echo \"User registered\" ;;\n\
             register-node) echo \"Registering node...\"; echo \"Node registered successfully with ID: abc-123\" ;;\n\
             start) echo \"prover started\" ;;\n\
             *) echo \"unknown command\" >&2; exit 2 ;;\n\
             esac\n",
            log = self.root.join("nexus-network.log").display()
        )
    }

    fn screen_script(&self) -> String {
        let listing = self.root.join("sessions.txt");
        format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{log}'\n\
             if [ \"$1\" = \"-ls\" ]; then\n\
             if [ -f '{listing}' ]; then cat '{listing}'; else echo 'No Sockets found in /run/screen/S-root.'; fi\n\
             exit 1\n\
             fi\n\
             exit 0\n",
            log = self.root.join("screen.log").display(),
            listing = listing.display()
        )
    }

    fn write_script(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        fs::write(&path, content).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Prompter replaying fixed answers; exhausted answers read as closed input.
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|answer| answer.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedAnswers {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// Render sink that keeps every message for later assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .expect("sink poisoned")
            .iter()
            .any(|line| line.contains(needle))
    }

    fn push(&self, text: String) {
        self.lines.lock().expect("sink poisoned").push(text);
    }
}

impl RenderSink for RecordingSink {
    fn section(&self, title: &str) {
        self.push(title.to_string());
    }
    fn rule(&self) {}
    fn activity(&self, text: &str) {
        self.push(text.to_string());
    }
    fn field(&self, key: &str, value: &str) {
        self.push(format!("{key}: {value}"));
    }
    fn menu_item(&self, key: &str, label: &str) {
        self.push(format!("{key}. {label}"));
    }
    fn detail(&self, text: &str) {
        self.push(text.to_string());
    }
    fn success(&self, msg: &str) {
        self.push(msg.to_string());
    }
    fn warn(&self, msg: &str) {
        self.push(format!("warning: {msg}"));
    }
    fn error(&self, msg: &str) {
        self.push(format!("error: {msg}"));
    }
    fn command_banner(&self, command: &str) {
        self.push(format!("Running: {command}"));
    }
    fn separator(&self) {}
    fn clear(&self) {}
}
