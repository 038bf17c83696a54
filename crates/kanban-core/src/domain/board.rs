//! Board state: the two ordered collections plus load bookkeeping.
//!
//! Design:
//! - `columns` order IS the visual column order.
//! - `tasks` is one flat sequence. A column's task order is derived by
//!   filtering on `column_id`, which keeps a cross-column move a single
//!   splice of one vector.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::errors::InvariantViolation;
use super::ids::{ColumnId, TaskId};
use super::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl BoardState {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self {
            columns,
            tasks,
            is_loading: false,
            error: None,
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Tasks of one column in visual order.
    pub fn tasks_in_column<'a>(&'a self, column_id: &'a ColumnId) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| &t.column_id == column_id)
    }

    /// Task ids of one column in visual order.
    pub fn task_ids_in_column(&self, column_id: &ColumnId) -> Vec<TaskId> {
        self.tasks_in_column(column_id).map(|t| t.id.clone()).collect()
    }

    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    /// Tasks whose column is not (yet) present.
    ///
    /// Only hydration can produce these, when tasks arrive before columns.
    pub fn orphaned_tasks(&self) -> Vec<&Task> {
        let known: HashSet<&ColumnId> = self.columns.iter().map(|c| &c.id).collect();
        self.tasks
            .iter()
            .filter(|t| !known.contains(&t.column_id))
            .collect()
    }

    /// No orphan tasks, no duplicate ids.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut columns = HashSet::new();
        for column in &self.columns {
            if !columns.insert(&column.id) {
                return Err(InvariantViolation::DuplicateColumn(column.id.clone()));
            }
        }

        let mut tasks = HashSet::new();
        for task in &self.tasks {
            if !tasks.insert(&task.id) {
                return Err(InvariantViolation::DuplicateTask(task.id.clone()));
            }
            if !columns.contains(&task.column_id) {
                return Err(InvariantViolation::OrphanTask {
                    task: task.id.clone(),
                    column: task.column_id.clone(),
                });
            }
        }
        Ok(())
    }
}
