//! JSON task file used by the command-line host.

use std::fs;
use std::path::{Path, PathBuf};

use super::{StoreError, TaskList};

const APP_DIR: &str = "pomoplanner";
const TASKS_FILE: &str = "tasks.json";

/// Reads and writes a [`TaskList`] as a JSON array.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/pomoplanner/tasks.json`.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(TASKS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the task list. A missing file is an empty list.
    pub fn load(&self) -> Result<TaskList, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "task file missing, starting empty");
            return Ok(TaskList::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the task list, creating parent directories as needed.
    pub fn save(&self, tasks: &TaskList) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(tasks).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(io_error)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "task file saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskDraft;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("tasks.json"));

        let mut list = TaskList::new();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        list.add(date, TaskDraft::new("Review").with_time("4:15 PM"))
            .unwrap();

        store.save(&list).unwrap();
        assert_eq!(store.load().unwrap(), list);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{not json").unwrap();

        let err = TaskStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
