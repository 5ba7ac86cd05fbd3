//! Terminal-facing UI facade.
//!
//! Orchestration code depends on the `RenderSink` and `Prompter` contracts
//! here rather than on stdout/stdin directly, so menu flows run headless in
//! tests.

pub mod render;
pub mod settings;
pub mod terminal;

pub use render::{RenderSink, Renderer};
pub use terminal::{Prompter, StdinPrompter};
