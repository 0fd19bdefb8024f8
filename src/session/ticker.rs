//! Tick sources for the session engine.
//!
//! A tick source is a cancellable repeating timer with exactly two
//! operations, `start` and `stop`. The engine owns its tick source and is the
//! only caller of either, so at most one source is ever active.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// A cancellable repeating timer owned by one engine.
pub trait TickSource {
    /// Begins delivering ticks. Restarts the period if already active.
    fn start(&mut self);

    /// Stops delivering ticks. Takes effect immediately.
    fn stop(&mut self);

    /// Returns true if ticks are being delivered.
    fn is_active(&self) -> bool;
}

// ============================================================================
// IntervalTicker
// ============================================================================

/// Tokio-backed tick source firing once per period.
///
/// The first tick arrives one full period after `start`. While stopped,
/// [`IntervalTicker::tick`] never resolves, which lets it sit in a
/// `tokio::select!` next to other inputs.
///
/// # Panics
///
/// Starting the ticker outside a tokio runtime panics. This includes
/// `PomodoroEngine<IntervalTicker>::toggle_timer` called from plain
/// synchronous code; use [`ManualTicker`] there.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::every_second()
    }
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick; pending forever while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicker {
    /// Must be called from within a tokio runtime.
    fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}

// ============================================================================
// ManualTicker
// ============================================================================

/// Tick source for hosts that deliver ticks themselves.
///
/// Only records whether it is active and how often it was started/stopped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualTicker {
    active: bool,
    starts: u32,
    stops: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `start` calls so far.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of `stop` calls that cancelled an active source.
    pub fn stops(&self) -> u32 {
        self.stops
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        self.active = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.active {
            self.stops += 1;
        }
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// Tests
// ============================================================================
