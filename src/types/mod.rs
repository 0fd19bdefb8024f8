//! Core data types for the Pomodoro session engine.
//!
//! This module defines the data structures used for:
//! - Session phases (Work / Break)
//! - Phase durations with validation
//! - The countdown state mutated by the engine

use serde::{Deserialize, Serialize};

use crate::timeutil::format_clock;

/// Length of a Work phase in seconds.
pub const WORK_DURATION_SECS: u32 = 25 * 60;

/// Length of a Break phase in seconds.
pub const BREAK_DURATION_SECS: u32 = 5 * 60;

/// Upper bound accepted for a configured phase length (2 hours).
pub const MAX_PHASE_SECS: u32 = 2 * 60 * 60;

// ============================================================================
// Phase
// ============================================================================

/// The phase of a Pomodoro cycle. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focus interval
    #[default]
    Work,
    /// Rest interval following a work phase
    Break,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }

    /// Returns the heading shown by hosts for this phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work Session",
            Phase::Break => "Break Time",
        }
    }

    /// Returns the phase that follows this one.
    #[must_use]
    pub fn next(&self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Phase durations for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Work phase length in seconds (1-7200)
    pub work_seconds: u32,
    /// Break phase length in seconds (1-7200)
    pub break_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_seconds: WORK_DURATION_SECS,
            break_seconds: BREAK_DURATION_SECS,
        }
    }
}

impl SessionConfig {
    /// Creates a new configuration with the specified work duration.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Creates a new configuration with the specified break duration.
    pub fn with_break_seconds(mut self, seconds: u32) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Full length of the given phase.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        }
    }

    /// Largest value `remaining_seconds` can take under this configuration.
    pub fn max_duration(&self) -> u32 {
        self.work_seconds.max(self.break_seconds)
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_seconds < 1 || self.work_seconds > MAX_PHASE_SECS {
            return Err(format!(
                "work phase must be between 1 and {} seconds",
                MAX_PHASE_SECS
            ));
        }
        if self.break_seconds < 1 || self.break_seconds > MAX_PHASE_SECS {
            return Err(format!(
                "break phase must be between 1 and {} seconds",
                MAX_PHASE_SECS
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Countdown state of a session.
///
/// `remaining_seconds` always stays within `0..=config.max_duration()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the tick source is delivering ticks
    pub running: bool,
    /// Phase that was active before the most recent transition
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_phase: Option<Phase>,
    /// Phase durations
    pub config: SessionConfig,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl TimerState {
    /// Creates the initial state: Work, full work duration, not running.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: config.work_seconds,
            running: false,
            previous_phase: None,
            config,
        }
    }

    /// Phase active before the most recent transition, if any has happened.
    pub fn previous_phase(&self) -> Option<Phase> {
        self.previous_phase
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if this tick exhausted the current phase.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Returns true if ending the current phase now earns a Pomodoro credit.
    ///
    /// Only a Break that directly follows a Work phase qualifies.
    pub fn completion_earns_credit(&self) -> bool {
        self.phase == Phase::Break && self.previous_phase == Some(Phase::Work)
    }

    /// Ends the current phase and loads the next one, stopped.
    ///
    /// Returns the phase that just ended.
    pub fn advance(&mut self) -> Phase {
        let ended = self.phase;
        self.previous_phase = Some(ended);
        self.phase = ended.next();
        self.remaining_seconds = self.config.duration_of(self.phase);
        self.running = false;
        ended
    }

    /// Forces the initial Work countdown. `previous_phase` is kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.remaining_seconds = self.config.work_seconds;
        self.running = false;
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Phase Tests
    // ------------------------------------------------------------------------

    mod phase_tests {
        use super::*;

        #[test]
        fn test_default_is_work() {
            assert_eq!(Phase::default(), Phase::Work);
        }

        #[test]
        fn test_next_alternates() {
            assert_eq!(Phase::Work.next(), Phase::Break);
            assert_eq!(Phase::Break.next(), Phase::Work);
        }

        #[test]
        fn test_as_str_and_label() {
            assert_eq!(Phase::Work.as_str(), "work");
            assert_eq!(Phase::Break.as_str(), "break");
            assert_eq!(Phase::Work.label(), "Work Session");
            assert_eq!(Phase::Break.label(), "Break Time");
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&Phase::Break).unwrap();
            assert_eq!(json, "\"break\"");
        }
    }

    // ------------------------------------------------------------------------
    // SessionConfig Tests
    // ------------------------------------------------------------------------

    mod session_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = SessionConfig::default();
            assert_eq!(config.work_seconds, 1500);
            assert_eq!(config.break_seconds, 300);
            assert_eq!(config.max_duration(), 1500);
        }

        #[test]
        fn test_builder_pattern() {
            let config = SessionConfig::default()
                .with_work_seconds(60)
                .with_break_seconds(90);
            assert_eq!(config.duration_of(Phase::Work), 60);
            assert_eq!(config.duration_of(Phase::Break), 90);
            assert_eq!(config.max_duration(), 90);
        }

        #[test]
        fn test_validate_bounds() {
            assert!(SessionConfig::default().validate().is_ok());
            assert!(SessionConfig::default().with_work_seconds(0).validate().is_err());
            assert!(SessionConfig::default()
                .with_break_seconds(MAX_PHASE_SECS + 1)
                .validate()
                .is_err());
            assert!(SessionConfig::default()
                .with_work_seconds(MAX_PHASE_SECS)
                .with_break_seconds(1)
                .validate()
                .is_ok());
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_initial_state() {
            let state = TimerState::default();
            assert_eq!(state.phase, Phase::Work);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.running);
            assert_eq!(state.previous_phase(), None);
        }

        #[test]
        fn test_tick_reports_exhaustion() {
            let mut state = TimerState::default();
            state.remaining_seconds = 2;
            assert!(!state.tick());
            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_advance_flips_phase_and_loads_duration() {
            let mut state = TimerState::default();
            state.running = true;

            let ended = state.advance();

            assert_eq!(ended, Phase::Work);
            assert_eq!(state.phase, Phase::Break);
            assert_eq!(state.remaining_seconds, 300);
            assert!(!state.running);
            assert_eq!(state.previous_phase(), Some(Phase::Work));
        }

        #[test]
        fn test_credit_only_for_break_after_work() {
            let mut state = TimerState::default();
            assert!(!state.completion_earns_credit());

            state.advance();
            assert!(state.completion_earns_credit());

            state.advance();
            assert!(!state.completion_earns_credit());
        }

        #[test]
        fn test_reset_keeps_previous_phase() {
            let mut state = TimerState::default();
            state.advance();
            state.running = true;
            state.remaining_seconds = 42;

            state.reset();

            assert_eq!(state.phase, Phase::Work);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.running);
            assert_eq!(state.previous_phase(), Some(Phase::Work));
        }

        #[test]
        fn test_remaining_display() {
            let state = TimerState::default();
            assert_eq!(state.remaining_display(), "25:00");
        }
    }
}
