//! Pomodoro focus session.
//!
//! - `ticker`: cancellable repeating tick sources
//! - `engine`: Work/Break state machine with per-task credits
//! - `runner`: async actor that serializes user operations and ticks

pub mod engine;
pub mod error;
pub mod runner;
pub mod ticker;

pub use engine::{PomodoroEngine, SessionEvent, SessionSnapshot};
pub use error::SessionError;
pub use runner::{SessionHandle, SessionRunner};
pub use ticker::{IntervalTicker, ManualTicker, TickSource};
