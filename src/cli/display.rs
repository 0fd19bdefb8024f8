//! Display utilities for the planner CLI.
//!
//! This module provides formatted output for:
//! - Time checks
//! - Day listings and task summaries
//! - Focus session status and events

use std::path::Path;

use chrono::NaiveDate;

use crate::session::{SessionEvent, SessionSnapshot};
use crate::tasks::{Task, TaskSummary};
use crate::timeutil::UNSET_MINUTES;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows whether a time string is valid and how it sorts.
    pub fn show_time_check(input: &str, valid: bool, minutes: u32) {
        let shown = if input.is_empty() { "(empty)" } else { input };
        if valid {
            println!("✓ {} is a valid time", shown);
        } else {
            println!("✗ {} is not a valid time (expected HH:MM AM/PM)", shown);
        }
        println!("  sort key: {}", Self::format_sort_key(minutes));
    }

    /// Shows a day's tasks in the given order.
    pub fn show_day(day: NaiveDate, tasks: &[&Task]) {
        println!("Tasks for {}", day.format("%B %-d, %Y"));
        println!("─────────────────────────────");

        if tasks.is_empty() {
            println!("No tasks for this day");
            return;
        }

        for task in tasks {
            println!("{}", Self::format_task_line(task));
        }
    }

    pub fn show_task_added(task: &Task) {
        println!("* Task added");
        println!("{}", Self::format_task_line(task));
    }

    pub fn show_completion(task: &Task) {
        if task.completed {
            println!("✓ Completed: {}", task.title);
        } else {
            println!("○ Reopened: {}", task.title);
        }
    }

    pub fn show_summary(summary: &TaskSummary) {
        println!("Task Summary");
        println!("─────────────────────────────");
        println!("Completed: {}", summary.completed);
        println!("Pending:   {}", summary.pending);
        println!("Total:     {}", summary.total());
    }

    pub fn show_focus_help() {
        println!("Commands: start|pause (s), reset (r), skip (f), select <id>, status, help, quit (q)");
    }

    pub fn show_snapshot(snapshot: &SessionSnapshot) {
        println!("{}", Self::format_snapshot(snapshot));
    }

    /// Shows a session event. Ticks are only logged.
    pub fn show_event(event: &SessionEvent) {
        match event {
            SessionEvent::Tick { remaining_seconds } => {
                tracing::trace!(remaining_seconds, "tick");
            }
            SessionEvent::PhaseCompleted { ended, next, skipped } => {
                let how = if *skipped { "skipped" } else { "finished" };
                println!("* {} {} → {}", ended.label(), how, next.label());
            }
            SessionEvent::PomodoroCredited { task_id, count } => {
                println!("⌚ Pomodoro earned for {} (total {})", task_id, count);
            }
            SessionEvent::CreditDropped => {
                println!("⌚ Pomodoro earned, but no task is selected");
            }
            other => tracing::debug!(?other, "session event"),
        }
    }

    pub fn show_final_counts(snapshot: &SessionSnapshot) {
        let earned: Vec<_> = snapshot
            .counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .collect();

        if earned.is_empty() {
            println!("No Pomodoros earned this session");
            return;
        }

        println!("Pomodoros earned this session:");
        for (task_id, count) in earned {
            println!("  {}: {}", task_id, count);
        }
    }

    pub fn show_credits_saved(applied: u32, path: &Path) {
        println!("* Saved {} Pomodoro(s) to {}", applied, path.display());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    fn format_sort_key(minutes: u32) -> String {
        if minutes == UNSET_MINUTES {
            "unset (sorts last)".to_string()
        } else {
            format!("{} minutes after midnight", minutes)
        }
    }

    fn format_task_line(task: &Task) -> String {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        let mut line = format!("{} {:<12} {}", mark, task.time, task.title);
        if task.pomodoros > 0 {
            line.push_str(&format!("  ⌚ {} Pomodoros", task.pomodoros));
        }
        line.push_str(&format!("  ({})", task.id));
        line
    }

    fn format_snapshot(snapshot: &SessionSnapshot) -> String {
        let state = if snapshot.running { "running" } else { "stopped" };
        let mut line = format!(
            "{} {} ({})",
            snapshot.phase.label(),
            snapshot.remaining_display,
            state
        );
        if let Some(task_id) = &snapshot.selected_task {
            line.push_str(&format!(
                " | {}: {} Pomodoros",
                task_id,
                snapshot.count_for(task_id)
            ));
        }
        line
    }
}

// ============================================================================
// Tests
// ============================================================================
