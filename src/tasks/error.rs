//! Task error types.

use std::path::PathBuf;

use thiserror::Error;

use super::MAX_EDITED_POMODOROS;

/// Errors raised when a task draft or task operation is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Title was empty after trimming.
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// Time did not pass validation.
    #[error("Please enter time in format HH:MM AM/PM (e.g., 10:30 AM), got '{0}'")]
    InvalidTime(String),

    /// Edited Pomodoro count outside the accepted range.
    #[error("Please enter a number from 0-{max} for Pomodoros, got {0}", max = MAX_EDITED_POMODOROS)]
    PomodoroOutOfRange(u32),

    /// No task with this id.
    #[error("Task '{0}' not found")]
    NotFound(String),
}

impl TaskError {
    /// Returns true if the error comes from user input rather than a lookup.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

/// Errors that can occur while reading or writing a task file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("task file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a task list.
    #[error("task file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No data directory could be determined for the default task file.
    #[error("no data directory available; pass --tasks explicitly")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors() {
        assert!(TaskError::EmptyTitle.is_validation());
        assert!(TaskError::InvalidTime("x".into()).is_validation());
        assert!(TaskError::PomodoroOutOfRange(12).is_validation());
        assert!(!TaskError::NotFound("id".into()).is_validation());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TaskError::PomodoroOutOfRange(12).to_string(),
            "Please enter a number from 0-9 for Pomodoros, got 12"
        );
        assert!(TaskError::InvalidTime("25:00".into())
            .to_string()
            .contains("HH:MM AM/PM"));
    }
}
