//! CLI module for the planner.
//!
//! This module provides the command-line host:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `focus`: Interactive focus session loop

pub mod commands;
pub mod display;
pub mod focus;

pub use commands::{AddArgs, Cli, Commands, DayArgs, FocusArgs};
pub use display::Display;
pub use focus::{run_focus, FocusInput};
