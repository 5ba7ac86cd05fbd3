//! Operator console flows.
//!
//! `Console` carries the session state explicitly; each menu action is a
//! method on it. Decisions that do not need a terminal (argument vectors,
//! choice parsing, step lists) live in plain functions so they test headless.

mod actions;
mod context;
pub mod menu;
pub mod setup;
pub mod utilities;

pub use context::Console;
pub use menu::{MainMenuChoice, MenuFlow, StartupChoice, UtilityChoice};
