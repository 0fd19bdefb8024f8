//! 12-hour clock parsing, validation and ordering.
//!
//! Task times are free text in the form `H:MM AM` / `HH:MM pm`. Two patterns
//! are in play:
//! - the accept pattern used by [`validate_time`] (hour 1-12, minute 00-59)
//! - the laxer capture pattern used by [`time_to_minutes`], which takes any
//!   one- or two-digit hour and any two-digit minute
//!
//! Anything that does not convert gets [`UNSET_MINUTES`] so it sorts last.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stored time of a task without a scheduled time.
pub const NO_TIME_SET: &str = "No time set";

/// Sort key for unset or unparseable times.
pub const UNSET_MINUTES: u32 = u32::MAX;

static ACCEPT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0?[1-9]|1[0-2]):[0-5][0-9]\s?(AM|PM|am|pm)$").expect("valid accept pattern")
});

static CAPTURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})\s?(AM|PM|am|pm)$").expect("valid capture pattern")
});

// ============================================================================
// TimeParseMode
// ============================================================================

/// Which pattern decides whether a time string gets a real sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeParseMode {
    /// Capture pattern; out-of-range hours and minutes still convert.
    #[default]
    Lax,
    /// Only strings accepted by [`validate_time`] convert.
    Strict,
}

impl TimeParseMode {
    /// Sort key for `input` under this mode.
    pub fn minutes(&self, input: &str) -> u32 {
        match self {
            TimeParseMode::Lax => time_to_minutes(input),
            TimeParseMode::Strict => time_to_minutes_strict(input),
        }
    }
}

// ============================================================================
// Validation and conversion
// ============================================================================

/// Returns true if `input` is an acceptable task time.
///
/// Empty input is valid and means "no time set".
pub fn validate_time(input: &str) -> bool {
    input.is_empty() || ACCEPT_PATTERN.is_match(input)
}

/// Converts a 12-hour time to minutes since midnight.
///
/// Returns [`UNSET_MINUTES`] for [`NO_TIME_SET`] and for anything the capture
/// pattern rejects. Hours are not range checked: `"13:30 PM"` yields 810.
pub fn time_to_minutes(input: &str) -> u32 {
    if input == NO_TIME_SET {
        return UNSET_MINUTES;
    }

    let Some(caps) = CAPTURE_PATTERN.captures(input) else {
        return UNSET_MINUTES;
    };

    // At most two ASCII digits each, so these cannot fail.
    let mut hours: u32 = caps[1].parse().unwrap_or_default();
    let minutes: u32 = caps[2].parse().unwrap_or_default();
    let is_pm = caps[3].eq_ignore_ascii_case("pm");

    if is_pm && hours < 12 {
        hours += 12;
    } else if !is_pm && hours == 12 {
        hours = 0;
    }

    hours * 60 + minutes
}

/// Like [`time_to_minutes`], but only strings accepted by [`validate_time`]
/// (and non-empty) convert.
pub fn time_to_minutes_strict(input: &str) -> u32 {
    if input.is_empty() || !ACCEPT_PATTERN.is_match(input) {
        return UNSET_MINUTES;
    }
    time_to_minutes(input)
}

/// Maps blank input to [`NO_TIME_SET`] and trims everything else.
pub fn normalize_time(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        NO_TIME_SET.to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Stable ascending sort by the time returned from `time_of`.
///
/// Unset and unparseable times go last; equal keys keep their input order.
pub fn sort_by_time<T, F>(items: &mut [T], mode: TimeParseMode, time_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| mode.minutes(time_of(item)));
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats a second count as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
