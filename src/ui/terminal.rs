//! Line-oriented operator input.

use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

use super::settings;

/// Source of operator answers.
///
/// Every prompt reads one full line. `Ok(None)` means the input stream is
/// closed, which callers treat as "leave the current menu".
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompter backed by the process stdin.
#[derive(Debug, Clone, Copy)]
pub struct StdinPrompter {
    color: bool,
}

impl StdinPrompter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Prompter for StdinPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        if self.color {
            write!(stdout, "{}", prompt.with(settings::color_prompt()))?;
        } else {
            write!(stdout, "{prompt}")?;
        }
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
