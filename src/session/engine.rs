//! Pomodoro session engine.
//!
//! This module provides the session state machine:
//! - Work / Break alternation driven by one tick per second
//! - Start/pause toggling, reset and fast-forward
//! - Per-task Pomodoro credits, granted when a Break that followed a Work
//!   phase completes
//!
//! The engine owns its [`TickSource`] and is the only code that starts or
//! stops it. Ticks are delivered back through [`PomodoroEngine::tick`].

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::mpsc;

use super::ticker::TickSource;
use crate::tasks::TaskId;
use crate::types::{Phase, SessionConfig, TimerState};

// ============================================================================
// SessionEvent
// ============================================================================

/// Notifications emitted by the engine for hosts and integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A task became the credit target
    TaskSelected {
        /// Selected task
        task_id: TaskId,
    },
    /// Countdown started or resumed
    Started {
        /// Phase being counted down
        phase: Phase,
        /// Seconds left when starting
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Phase that was paused
        phase: Phase,
        /// Seconds left at pause time
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// A phase ended, by expiry or fast-forward
    PhaseCompleted {
        /// Phase that ended
        ended: Phase,
        /// Phase now loaded
        next: Phase,
        /// True if ended by fast-forward
        skipped: bool,
    },
    /// A task earned a Pomodoro
    PomodoroCredited {
        /// Credited task
        task_id: TaskId,
        /// New count for the task
        count: u32,
    },
    /// A Pomodoro was earned while no task was selected
    CreditDropped,
    /// Timer forced back to the initial Work countdown
    Reset,
}

// ============================================================================
// SessionSnapshot
// ============================================================================

/// Read-only copy of everything a host renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    /// `MM:SS`
    pub remaining_display: String,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_task: Option<TaskId>,
    pub counts: BTreeMap<TaskId, u32>,
}

impl SessionSnapshot {
    /// Count for `task_id`, 0 if unknown.
    pub fn count_for(&self, task_id: &TaskId) -> u32 {
        self.counts.get(task_id).copied().unwrap_or(0)
    }
}

// ============================================================================
// PomodoroEngine
// ============================================================================

/// Session state machine with per-task Pomodoro counts.
#[derive(Debug)]
pub struct PomodoroEngine<T: TickSource> {
    /// Countdown state
    state: TimerState,
    /// Tick source, owned exclusively
    ticker: T,
    /// Task that receives the next credit
    selected_task: Option<TaskId>,
    /// Credits per task; only ever incremented
    counts: BTreeMap<TaskId, u32>,
    /// Optional event sink
    event_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl<T: TickSource> PomodoroEngine<T> {
    /// Creates an engine in the initial state: Work, full duration, stopped.
    pub fn new(config: SessionConfig, ticker: T) -> Self {
        Self {
            state: TimerState::new(config),
            ticker,
            selected_task: None,
            counts: BTreeMap::new(),
            event_tx: None,
        }
    }

    /// Sends engine events to `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Seeds a zero count for each known task.
    pub fn with_tasks<I>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = TaskId>,
    {
        for task_id in task_ids {
            self.counts.entry(task_id).or_insert(0);
        }
        self
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Makes `task_id` the target of the next credit.
    ///
    /// The countdown is not touched; a phase in progress keeps running.
    pub fn select_task(&mut self, task_id: TaskId) {
        self.counts.entry(task_id.clone()).or_insert(0);
        tracing::debug!(task_id = %task_id, "task selected");
        self.selected_task = Some(task_id.clone());
        self.emit(SessionEvent::TaskSelected { task_id });
    }

    /// Pauses a running countdown or starts a stopped one.
    pub fn toggle_timer(&mut self) {
        if self.state.running {
            self.ticker.stop();
            self.state.running = false;
            tracing::debug!(remaining = self.state.remaining_seconds, "timer paused");
            self.emit(SessionEvent::Paused {
                phase: self.state.phase,
                remaining_seconds: self.state.remaining_seconds,
            });
        } else {
            self.ticker.stop();
            self.ticker.start();
            self.state.running = true;
            tracing::debug!(
                phase = %self.state.phase,
                remaining = self.state.remaining_seconds,
                "timer started"
            );
            self.emit(SessionEvent::Started {
                phase: self.state.phase,
                remaining_seconds: self.state.remaining_seconds,
            });
        }
    }

    /// Handles one tick from the tick source.
    ///
    /// Ticks arriving while stopped are ignored. The tick that exhausts the
    /// phase stops the source and moves to the next phase.
    pub fn tick(&mut self) {
        if !self.state.running {
            tracing::trace!("tick ignored while stopped");
            return;
        }

        let exhausted = self.state.tick();
        self.emit(SessionEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });

        if exhausted {
            self.ticker.stop();
            self.complete_phase(false);
        }
    }

    /// Stops the countdown and returns to a full, stopped Work phase.
    ///
    /// Counts and the previous-phase bookkeeping are left alone.
    pub fn reset_timer(&mut self) {
        self.ticker.stop();
        self.state.reset();
        tracing::debug!("timer reset");
        self.emit(SessionEvent::Reset);
    }

    /// Ends the running phase immediately, as if it had expired.
    ///
    /// No-op while stopped.
    pub fn fast_forward(&mut self) {
        if !self.state.running {
            tracing::debug!("fast-forward ignored while stopped");
            return;
        }
        self.ticker.stop();
        self.complete_phase(true);
    }

    fn complete_phase(&mut self, skipped: bool) {
        let earns_credit = self.state.completion_earns_credit();
        let ended = self.state.advance();

        tracing::info!(ended = %ended, next = %self.state.phase, skipped, "phase completed");
        self.emit(SessionEvent::PhaseCompleted {
            ended,
            next: self.state.phase,
            skipped,
        });

        if earns_credit {
            self.credit_selected_task();
        }
    }

    fn credit_selected_task(&mut self) {
        let Some(task_id) = self.selected_task.clone() else {
            tracing::warn!("pomodoro completed with no task selected");
            self.emit(SessionEvent::CreditDropped);
            return;
        };

        let count = self.counts.entry(task_id.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        tracing::info!(task_id = %task_id, count, "pomodoro credited");
        self.emit(SessionEvent::PomodoroCredited { task_id, count });
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).is_err() {
                tracing::trace!("event receiver dropped");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_display(&self) -> String {
        self.state.remaining_display()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn previous_phase(&self) -> Option<Phase> {
        self.state.previous_phase()
    }

    pub fn selected_task(&self) -> Option<&TaskId> {
        self.selected_task.as_ref()
    }

    /// Credits for `task_id`, 0 if never seen.
    pub fn pomodoro_count(&self, task_id: &TaskId) -> u32 {
        self.counts.get(task_id).copied().unwrap_or(0)
    }

    pub fn pomodoro_counts(&self) -> &BTreeMap<TaskId, u32> {
        &self.counts
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Mutable access for whoever awaits the tick source.
    ///
    /// Starting or stopping it through this reference breaks the engine's
    /// running flag; only wait on it.
    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            remaining_seconds: self.state.remaining_seconds,
            remaining_display: self.state.remaining_display(),
            running: self.state.running,
            selected_task: self.selected_task.clone(),
            counts: self.counts.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
