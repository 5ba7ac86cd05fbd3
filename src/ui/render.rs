//! Rendering contract and the default terminal renderer.

use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, ExecutableCommand};
use std::io::{self, Write};

use super::settings;

/// Injectable rendering interface used by orchestration code.
///
/// `Renderer` is the terminal implementation; tests substitute a capturing
/// sink to assert on operator-facing messages.
pub trait RenderSink: Send + Sync {
    /// Render a titled section header.
    fn section(&self, title: &str);
    /// Render a horizontal rule.
    fn rule(&self);
    /// Render activity/lifecycle text.
    fn activity(&self, text: &str);
    /// Render one key/value field row.
    fn field(&self, key: &str, value: &str);
    /// Render one numbered menu entry.
    fn menu_item(&self, key: &str, label: &str);
    /// Render additional detail text.
    fn detail(&self, text: &str);
    /// Render a success line.
    fn success(&self, msg: &str);
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render an error line.
    fn error(&self, msg: &str);
    /// Render the command line about to be executed.
    fn command_banner(&self, command: &str);
    /// Render the separator printed after each command.
    fn separator(&self);
    /// Clear the terminal before redrawing a menu.
    fn clear(&self);
}

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl RenderSink for Renderer {
    fn section(&self, title: &str) {
        if self.color {
            println!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::color_section_bullet()),
                title.with(settings::color_section_title()).bold()
            );
        } else {
            println!("{title}");
        }
    }

    fn rule(&self) {
        if self.color {
            println!("{}", settings::RULE.with(settings::color_rule()));
        } else {
            println!("{}", settings::RULE);
        }
    }

    fn activity(&self, text: &str) {
        if self.color {
            println!("{}", text.with(settings::color_section_title()));
        } else {
            println!("{text}");
        }
    }

    fn field(&self, key: &str, value: &str) {
        if self.color {
            println!(
                "{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::color_field_key()),
                value.with(settings::color_field_value()),
            );
        } else {
            println!("{}{key}: {value}", settings::INDENT_1);
        }
    }

    fn menu_item(&self, key: &str, label: &str) {
        if self.color {
            println!("{}. {label}", key.with(settings::color_section_title()).bold());
        } else {
            println!("{key}. {label}");
        }
    }

    fn detail(&self, text: &str) {
        println!("{}{text}", settings::INDENT_1);
    }

    fn success(&self, msg: &str) {
        if self.color {
            println!(
                "{} {}",
                settings::GLYPH_OK.with(settings::color_success()),
                msg.with(settings::color_success())
            );
        } else {
            println!("{} {msg}", settings::GLYPH_OK_PLAIN);
        }
    }

    fn warn(&self, msg: &str) {
        if self.color {
            println!(
                "{} {msg}",
                settings::LABEL_WARNING
                    .with(settings::color_warning())
                    .bold()
            );
        } else {
            println!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            println!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::color_error()).bold()
            );
        } else {
            println!("{} {msg}", settings::LABEL_ERROR);
        }
    }

    fn command_banner(&self, command: &str) {
        println!();
        if self.color {
            println!(
                "{} {} {command}",
                settings::GLYPH_RUN.with(settings::color_warning()),
                settings::LABEL_RUNNING.with(settings::color_warning()),
            );
        } else {
            println!(
                "{} {} {command}",
                settings::GLYPH_RUN_PLAIN,
                settings::LABEL_RUNNING
            );
        }
    }

    fn separator(&self) {
        println!("{}", settings::SEPARATOR);
    }

    fn clear(&self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(Clear(ClearType::All));
        let _ = stdout.execute(MoveTo(0, 0));
        let _ = stdout.flush();
    }
}
