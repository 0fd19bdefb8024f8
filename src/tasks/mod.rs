//! Task records consumed by the planner.
//!
//! Tasks are owned by whatever store the host uses; this module provides the
//! record type, draft validation as done by the add/edit forms, and the
//! list operations the host needs (day view, completion toggle, summary and
//! applying Pomodoro credits reported by a session).

pub mod error;
pub mod store;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeutil::{normalize_time, sort_by_time, validate_time, TimeParseMode, NO_TIME_SET};

pub use error::{StoreError, TaskError};
pub use store::TaskStore;

/// Highest Pomodoro count accepted when editing a task by hand.
pub const MAX_EDITED_POMODOROS: u32 = 9;

// ============================================================================
// TaskId
// ============================================================================

/// Opaque, unique task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Task
// ============================================================================

fn default_time() -> String {
    NO_TIME_SET.to_string()
}

/// A scheduled to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// `H:MM AM/PM` or [`NO_TIME_SET`]
    #[serde(default = "default_time")]
    pub time: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pomodoros: u32,
}

impl Task {
    /// Creates a task for `date` from a validated draft.
    pub fn new(date: NaiveDate, draft: TaskDraft) -> Result<Self, TaskError> {
        draft.validate()?;
        Ok(Self {
            id: TaskId::generate(),
            title: draft.title.trim().to_string(),
            time: normalize_time(&draft.time),
            date,
            completed: false,
            pomodoros: draft.pomodoros,
        })
    }

    /// Returns true if the task has a scheduled time.
    pub fn has_time(&self) -> bool {
        self.time != NO_TIME_SET
    }
}

// ============================================================================
// TaskDraft
// ============================================================================

/// User input for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    /// Empty means no time set
    pub time: String,
    pub pomodoros: u32,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_pomodoros(mut self, pomodoros: u32) -> Self {
        self.pomodoros = pomodoros;
        self
    }

    /// Checks the rules of the add form: non-blank title, valid or empty time.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if self.time != NO_TIME_SET && !validate_time(&self.time) {
            return Err(TaskError::InvalidTime(self.time.clone()));
        }
        Ok(())
    }

    /// Checks the rules of the edit form, which also bounds the Pomodoro count.
    pub fn validate_edit(&self) -> Result<(), TaskError> {
        self.validate()?;
        if self.pomodoros > MAX_EDITED_POMODOROS {
            return Err(TaskError::PomodoroOutOfRange(self.pomodoros));
        }
        Ok(())
    }
}

// ============================================================================
// TaskSummary
// ============================================================================

/// Completed versus pending task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn total(&self) -> usize {
        self.completed + self.pending
    }
}

// ============================================================================
// TaskList
// ============================================================================

/// An ordered collection of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Validates `draft` and appends a new task for `date`.
    pub fn add(&mut self, date: NaiveDate, draft: TaskDraft) -> Result<&Task, TaskError> {
        let task = Task::new(date, draft)?;
        tracing::debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replaces title, time and Pomodoro count of an existing task.
    pub fn update(&mut self, id: &TaskId, draft: TaskDraft) -> Result<&Task, TaskError> {
        draft.validate_edit()?;
        let task = self.get_mut(id)?;
        task.title = draft.title.trim().to_string();
        task.time = normalize_time(&draft.time);
        task.pomodoros = draft.pomodoros;
        Ok(&*task)
    }

    /// Flips the completed flag and returns the new value.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Result<bool, TaskError> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Tasks dated `day`, in stored order.
    pub fn for_day(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.date == day).collect()
    }

    /// Tasks dated `day`, ordered by time with unset times last.
    pub fn for_day_sorted(&self, day: NaiveDate, mode: TimeParseMode) -> Vec<&Task> {
        let mut tasks = self.for_day(day);
        sort_by_time(&mut tasks, mode, |task| task.time.as_str());
        tasks
    }

    pub fn summary(&self) -> TaskSummary {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskSummary {
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Adds session credits onto the stored Pomodoro counts.
    ///
    /// Returns the number of credits applied. Ids not in the list are skipped.
    pub fn apply_credits(&mut self, credits: &BTreeMap<TaskId, u32>) -> u32 {
        let mut applied: u32 = 0;
        for (id, &count) in credits {
            if count == 0 {
                continue;
            }
            match self.tasks.iter_mut().find(|task| &task.id == id) {
                Some(task) => {
                    task.pomodoros = task.pomodoros.saturating_add(count);
                    applied = applied.saturating_add(count);
                }
                None => tracing::warn!(id = %id, count, "credits for unknown task dropped"),
            }
        }
        applied
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn task(id: &str, time: &str, date: NaiveDate) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("Task {}", id),
            time: time.to_string(),
            date,
            completed: false,
            pomodoros: 0,
        }
    }

    // ------------------------------------------------------------------------
    // TaskDraft Tests
    // ------------------------------------------------------------------------

    mod draft_tests {
        use super::*;

        #[test]
        fn test_blank_title_rejected() {
            let draft = TaskDraft::new("   ");
            assert_eq!(draft.validate(), Err(TaskError::EmptyTitle));
        }

        #[test]
        fn test_invalid_time_rejected() {
            let draft = TaskDraft::new("Read").with_time("13:00 PM");
            assert_eq!(
                draft.validate(),
                Err(TaskError::InvalidTime("13:00 PM".to_string()))
            );
        }

        #[test]
        fn test_padded_time_rejected() {
            let draft = TaskDraft::new("Read").with_time(" 10:30 AM");
            assert_eq!(
                draft.validate(),
                Err(TaskError::InvalidTime(" 10:30 AM".to_string()))
            );
            assert!(TaskDraft::new("Read").with_time(" ").validate().is_err());
        }

        #[test]
        fn test_empty_and_sentinel_time_accepted() {
            assert!(TaskDraft::new("Read").validate().is_ok());
            assert!(TaskDraft::new("Read").with_time(NO_TIME_SET).validate().is_ok());
        }

        #[test]
        fn test_edit_bounds_pomodoros() {
            let draft = TaskDraft::new("Read").with_pomodoros(10);
            assert!(draft.validate().is_ok());
            assert_eq!(draft.validate_edit(), Err(TaskError::PomodoroOutOfRange(10)));
            assert!(TaskDraft::new("Read").with_pomodoros(9).validate_edit().is_ok());
        }

        #[test]
        fn test_new_task_normalizes() {
            let created = Task::new(day(1), TaskDraft::new("  Write report ")).unwrap();
            assert_eq!(created.title, "Write report");
            assert_eq!(created.time, NO_TIME_SET);
            assert!(!created.has_time());
            assert!(!created.completed);
            assert!(!created.id.as_str().is_empty());
        }
    }

    // ------------------------------------------------------------------------
    // TaskList Tests
    // ------------------------------------------------------------------------

    mod list_tests {
        use super::*;

        #[test]
        fn test_for_day_sorted() {
            let list = TaskList::from(vec![
                task("a", NO_TIME_SET, day(1)),
                task("b", "2:00 PM", day(1)),
                task("c", "8:00 AM", day(2)),
                task("d", "9:30 AM", day(1)),
            ]);

            let ids: Vec<&str> = list
                .for_day_sorted(day(1), TimeParseMode::Lax)
                .iter()
                .map(|task| task.id.as_str())
                .collect();
            assert_eq!(ids, vec!["d", "b", "a"]);
        }

        #[test]
        fn test_add_and_update() {
            let mut list = TaskList::new();
            let id = list
                .add(day(3), TaskDraft::new("Plan").with_time("10:00 AM"))
                .unwrap()
                .id
                .clone();

            let updated = list
                .update(&id, TaskDraft::new("Plan week").with_pomodoros(2))
                .unwrap();
            assert_eq!(updated.title, "Plan week");
            assert_eq!(updated.time, NO_TIME_SET);
            assert_eq!(updated.pomodoros, 2);
            assert_eq!(list.len(), 1);
        }

        #[test]
        fn test_update_missing_task() {
            let mut list = TaskList::new();
            let result = list.update(&TaskId::from("nope"), TaskDraft::new("x"));
            assert_eq!(result, Err(TaskError::NotFound("nope".to_string())));
        }

        #[test]
        fn test_toggle_complete_and_summary() {
            let mut list = TaskList::from(vec![
                task("a", NO_TIME_SET, day(1)),
                task("b", NO_TIME_SET, day(1)),
            ]);
            assert!(list.toggle_complete(&TaskId::from("a")).unwrap());

            let summary = list.summary();
            assert_eq!(summary.completed, 1);
            assert_eq!(summary.pending, 1);
            assert_eq!(summary.total(), 2);

            assert!(!list.toggle_complete(&TaskId::from("a")).unwrap());
        }

        #[test]
        fn test_apply_credits() {
            let mut list = TaskList::from(vec![task("a", NO_TIME_SET, day(1))]);
            let mut credits = BTreeMap::new();
            credits.insert(TaskId::from("a"), 2);
            credits.insert(TaskId::from("ghost"), 5);

            assert_eq!(list.apply_credits(&credits), 2);
            assert_eq!(list.get(&TaskId::from("a")).unwrap().pomodoros, 2);
        }

        #[test]
        fn test_apply_credits_saturates_total() {
            let mut list = TaskList::from(vec![
                task("a", NO_TIME_SET, day(1)),
                task("b", NO_TIME_SET, day(1)),
            ]);
            let mut credits = BTreeMap::new();
            credits.insert(TaskId::from("a"), u32::MAX);
            credits.insert(TaskId::from("b"), 3);

            assert_eq!(list.apply_credits(&credits), u32::MAX);
            assert_eq!(list.get(&TaskId::from("b")).unwrap().pomodoros, 3);
        }

        #[test]
        fn test_deserialize_defaults() {
            let json = r#"[{"id": "x", "title": "Walk", "date": "2024-05-01"}]"#;
            let list: TaskList = serde_json::from_str(json).unwrap();
            let walk = list.get(&TaskId::from("x")).unwrap();
            assert_eq!(walk.time, NO_TIME_SET);
            assert_eq!(walk.pomodoros, 0);
            assert!(!walk.completed);
        }
    }
}
