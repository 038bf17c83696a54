//! Store actions: every way the board may change.
//!
//! Nothing outside the store splices `columns` / `tasks` directly; callers
//! describe the change as a `BoardAction` and the reducer applies it.

use crate::domain::{Column, ColumnChanges, ColumnId, Task, TaskChanges, TaskId};

/// Phase of one remote load request.
///
/// State transitions:
/// - Pending -> Fulfilled
/// - Pending -> Rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    AddColumn(Column),
    UpdateColumn { id: ColumnId, changes: ColumnChanges },
    /// Removes the column and, atomically, every task it owns.
    RemoveColumn(ColumnId),
    ReplaceColumns(Vec<Column>),
    MoveColumn { from: usize, to: usize },

    AddTask(Task),
    UpdateTask { id: TaskId, changes: TaskChanges },
    RemoveTask(TaskId),
    ReplaceTasks(Vec<Task>),
    ReassignParent { task_id: TaskId, column_id: ColumnId },
    /// Reparent, then place at `index` within the target column's order.
    MoveTask {
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    },

    ColumnsLoad(LoadPhase<Vec<Column>>),
    TasksLoad(LoadPhase<Vec<Task>>),
}

impl BoardAction {
    /// Stable name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            BoardAction::AddColumn(_) => "add_column",
            BoardAction::UpdateColumn { .. } => "update_column",
            BoardAction::RemoveColumn(_) => "remove_column",
            BoardAction::ReplaceColumns(_) => "replace_columns",
            BoardAction::MoveColumn { .. } => "move_column",
            BoardAction::AddTask(_) => "add_task",
            BoardAction::UpdateTask { .. } => "update_task",
            BoardAction::RemoveTask(_) => "remove_task",
            BoardAction::ReplaceTasks(_) => "replace_tasks",
            BoardAction::ReassignParent { .. } => "reassign_parent",
            BoardAction::MoveTask { .. } => "move_task",
            BoardAction::ColumnsLoad(_) => "columns_load",
            BoardAction::TasksLoad(_) => "tasks_load",
        }
    }

    /// Load bookkeeping may commit tasks before their columns arrive.
    pub fn is_hydration(&self) -> bool {
        matches!(
            self,
            BoardAction::ColumnsLoad(_) | BoardAction::TasksLoad(_)
        )
    }
}
