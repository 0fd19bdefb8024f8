//! Planner configuration.
//!
//! Settings come from an optional JSON file. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timeutil::TimeParseMode;
use crate::types::{SessionConfig, BREAK_DURATION_SECS, WORK_DURATION_SECS};

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

fn default_work_seconds() -> u32 {
    WORK_DURATION_SECS
}

fn default_break_seconds() -> u32 {
    BREAK_DURATION_SECS
}

/// Settings for the planner host.
///
/// # Example
///
/// ```
/// use pomoplanner::config::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.work_seconds, 1500);
/// assert_eq!(config.break_seconds, 300);
/// assert!(!config.strict_time_parsing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Work phase length in seconds.
    #[serde(default = "default_work_seconds")]
    pub work_seconds: u32,

    /// Break phase length in seconds.
    #[serde(default = "default_break_seconds")]
    pub break_seconds: u32,

    /// Sort only times that pass validation; others go last.
    #[serde(default)]
    pub strict_time_parsing: bool,

    /// Task file; the per-user data directory is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_path: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            work_seconds: default_work_seconds(),
            break_seconds: default_break_seconds(),
            strict_time_parsing: false,
            tasks_path: None,
        }
    }
}

impl PlannerConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session().validate().map_err(ConfigError::Invalid)
    }

    /// Phase durations for the session engine.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            work_seconds: self.work_seconds,
            break_seconds: self.break_seconds,
        }
    }

    pub fn parse_mode(&self) -> TimeParseMode {
        if self.strict_time_parsing {
            TimeParseMode::Strict
        } else {
            TimeParseMode::Lax
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{"break_seconds": 600}"#).unwrap();
        assert_eq!(config.work_seconds, 1500);
        assert_eq!(config.break_seconds, 600);
        assert_eq!(config.parse_mode(), TimeParseMode::Lax);
        assert_eq!(config.tasks_path, None);
    }

    #[test]
    fn test_strict_parsing_flag() {
        let config = PlannerConfig {
            strict_time_parsing: true,
            ..PlannerConfig::default()
        };
        assert_eq!(config.parse_mode(), TimeParseMode::Strict);
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"work_seconds": 0}"#).unwrap();

        let err = PlannerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlannerConfig::load(Path::new("/nonexistent/pomoplanner.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            PlannerConfig::load_or_default(None).unwrap(),
            PlannerConfig::default()
        );
    }

    #[test]
    fn test_session_config() {
        let config = PlannerConfig {
            work_seconds: 60,
            break_seconds: 30,
            ..PlannerConfig::default()
        };
        assert_eq!(config.session().duration_of(crate::types::Phase::Break), 30);
    }
}
