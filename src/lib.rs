//! PomoPlanner Library
//!
//! This library provides the core of a daily task planner:
//! - 12-hour time validation, sort keys and stable time ordering
//! - Task records, form validation and day views
//! - Pomodoro session engine crediting completed cycles to tasks
//! - Async session runner driven by a tokio tick source
//! - Configuration and the CLI host built on top

pub mod cli;
pub mod config;
pub mod session;
pub mod tasks;
pub mod timeutil;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Phase, SessionConfig, TimerState, BREAK_DURATION_SECS, WORK_DURATION_SECS};

pub use timeutil::{
    format_clock, sort_by_time, time_to_minutes, time_to_minutes_strict, validate_time,
    TimeParseMode, NO_TIME_SET, UNSET_MINUTES,
};

pub use tasks::{Task, TaskDraft, TaskError, TaskId, TaskList, TaskStore, TaskSummary};

pub use session::{
    IntervalTicker, ManualTicker, PomodoroEngine, SessionError, SessionEvent, SessionHandle,
    SessionRunner, SessionSnapshot, TickSource,
};

pub use config::{ConfigError, PlannerConfig};
