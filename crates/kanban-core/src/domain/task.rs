//! Task: a unit of work owned by exactly one column.
//!
//! Position within the column is implicit: the task's rank among all tasks
//! sharing its `column_id`, read through the global task sequence.

use serde::{Deserialize, Serialize};

use super::ids::{ColumnId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub title: String,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            title: title.into(),
        }
    }

    /// Merge a partial update into this task.
    pub fn apply(&mut self, changes: TaskChanges) {
        if let Some(column_id) = changes.column_id {
            self.column_id = column_id;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
    }
}

/// Partial update for a task (`None` = leave unchanged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChanges {
    #[serde(default)]
    pub column_id: Option<ColumnId>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TaskChanges {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
