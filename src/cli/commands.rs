//! Command definitions for the planner CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// PomoPlanner - daily tasks with a Pomodoro focus timer
#[derive(Parser, Debug)]
#[command(
    name = "pomoplanner",
    version,
    about = "Daily task planner with a Pomodoro focus timer",
    long_about = "Lists a day's tasks ordered by their 12-hour time and runs a\n\
                  Work/Break focus session that credits Pomodoros to the selected task.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Task file (JSON), overrides the configured location
    #[arg(long, global = true, value_name = "FILE")]
    pub tasks: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check a 12-hour time (e.g. "10:30 AM") and show its sort key
    CheckTime {
        /// Time to check; an empty string means "no time set"
        time: String,
    },

    /// List a day's tasks ordered by time
    Today(DayArgs),

    /// Add a task
    Add(AddArgs),

    /// Toggle a task between completed and pending
    Complete {
        /// Task id
        id: String,
    },

    /// Show completed and pending task counts
    Stats,

    /// Run an interactive focus session
    Focus(FocusArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Command Arguments
// ============================================================================

/// Arguments selecting a day
#[derive(Args, Debug, Clone, Default)]
pub struct DayArgs {
    /// Day to show (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the add command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task title
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Time in HH:MM AM/PM format
    #[arg(short, long, default_value = "")]
    pub time: String,

    /// Day of the task (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Pomodoros already spent
    #[arg(short, long, default_value = "0")]
    pub pomodoros: u32,
}

/// Arguments for the focus command
#[derive(Args, Debug, Clone, Default)]
pub struct FocusArgs {
    /// Task to credit from the start
    #[arg(short, long)]
    pub task: Option<String>,

    /// Day whose tasks are offered (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Add earned Pomodoros to the task file on exit
    #[arg(long)]
    pub save: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the task title.
fn validate_title(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("task title cannot be empty".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
