//! Centralized glyphs, labels, and colors for console output.

use crossterm::style::Color;

pub const INDENT_1: &str = "  ";

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const LABEL_RUNNING: &str = "Running:";

pub const GLYPH_SECTION_BULLET: &str = "•";
pub const GLYPH_RUN: &str = "▶";
pub const GLYPH_RUN_PLAIN: &str = ">";
pub const GLYPH_OK: &str = "✔";
pub const GLYPH_OK_PLAIN: &str = "ok:";

pub const SEPARATOR: &str = "--------------------------------------------------------";
pub const RULE: &str = "========================================================";

/// Placeholder shown for persisted fields that were never set.
pub const NOT_SET: &str = "[not set]";

pub fn color_section_title() -> Color {
    Color::Cyan
}

pub fn color_section_bullet() -> Color {
    Color::DarkGrey
}

pub fn color_rule() -> Color {
    Color::Blue
}

pub fn color_field_key() -> Color {
    Color::Grey
}

pub fn color_field_value() -> Color {
    Color::Yellow
}

pub fn color_prompt() -> Color {
    Color::Cyan
}

pub fn color_success() -> Color {
    Color::Green
}

pub fn color_warning() -> Color {
    Color::Yellow
}

pub fn color_error() -> Color {
    Color::Red
}
