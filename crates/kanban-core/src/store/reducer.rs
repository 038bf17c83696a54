//! Pure state transitions.
//!
//! `reduce` never mutates its input: it returns the complete next state or
//! an error, so a refused action leaves the committed board untouched.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::warn;

use super::action::{BoardAction, LoadPhase};
use super::ordering::{array_move, task_index};
use crate::domain::{BoardError, BoardState, Column, ColumnId, Task};

pub fn reduce(state: &BoardState, action: BoardAction) -> Result<BoardState, BoardError> {
    let mut next = state.clone();

    match action {
        BoardAction::AddColumn(column) => {
            if next.has_column(&column.id) {
                return Err(BoardError::DuplicateColumn(column.id));
            }
            next.columns.push(column);
        }

        BoardAction::UpdateColumn { id, changes } => {
            let Some(column) = next.columns.iter_mut().find(|c| c.id == id) else {
                return Err(BoardError::ColumnNotFound(id));
            };
            column.apply(changes);
        }

        BoardAction::RemoveColumn(id) => {
            if !next.has_column(&id) {
                return Err(BoardError::ColumnNotFound(id));
            }
            next.columns.retain(|c| c.id != id);
            next.tasks.retain(|t| t.column_id != id);
        }

        BoardAction::ReplaceColumns(columns) => {
            ensure_unique_columns(&columns)?;
            let kept: HashSet<&ColumnId> = columns.iter().map(|c| &c.id).collect();
            // Only tasks that currently have a parent can be orphaned by this.
            if let Some(task) = state
                .tasks
                .iter()
                .find(|t| state.has_column(&t.column_id) && !kept.contains(&t.column_id))
            {
                return Err(BoardError::OrphanTask {
                    task: task.id.clone(),
                    column: task.column_id.clone(),
                });
            }
            next.columns = columns;
        }

        BoardAction::MoveColumn { from, to } => {
            let len = next.columns.len();
            for index in [from, to] {
                if index >= len {
                    return Err(BoardError::IndexOutOfBounds { index, len });
                }
            }
            next.columns = array_move(next.columns, from, to);
        }

        BoardAction::AddTask(task) => {
            if next.task(&task.id).is_some() {
                return Err(BoardError::DuplicateTask(task.id));
            }
            if !next.has_column(&task.column_id) {
                return Err(BoardError::ColumnNotFound(task.column_id));
            }
            next.tasks.push(task);
        }

        BoardAction::UpdateTask { id, changes } => {
            if let Some(column_id) = &changes.column_id
                && !next.has_column(column_id)
            {
                return Err(BoardError::ColumnNotFound(column_id.clone()));
            }
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
                return Err(BoardError::TaskNotFound(id));
            };
            task.apply(changes);
        }

        BoardAction::RemoveTask(id) => {
            let Some(index) = task_index(&next.tasks, &id) else {
                return Err(BoardError::TaskNotFound(id));
            };
            next.tasks.remove(index);
        }

        BoardAction::ReplaceTasks(tasks) => {
            ensure_unique_tasks(&tasks)?;
            for task in &tasks {
                if next.has_column(&task.column_id) {
                    continue;
                }
                // A task hydrated ahead of its column may keep that parent.
                let unchanged = state.task(&task.id).map(|t| &t.column_id) == Some(&task.column_id);
                if !unchanged {
                    return Err(BoardError::ColumnNotFound(task.column_id.clone()));
                }
            }
            next.tasks = tasks;
        }

        BoardAction::ReassignParent { task_id, column_id } => {
            if !next.has_column(&column_id) {
                return Err(BoardError::ColumnNotFound(column_id));
            }
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == task_id) else {
                return Err(BoardError::TaskNotFound(task_id));
            };
            task.column_id = column_id;
        }

        BoardAction::MoveTask {
            task_id,
            column_id,
            index,
        } => {
            if !next.has_column(&column_id) {
                return Err(BoardError::ColumnNotFound(column_id));
            }
            let Some(from) = task_index(&next.tasks, &task_id) else {
                return Err(BoardError::TaskNotFound(task_id));
            };
            let mut task = next.tasks.remove(from);
            task.column_id = column_id;

            let siblings: Vec<usize> = next
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.column_id == task.column_id)
                .map(|(i, _)| i)
                .collect();
            let at = match (siblings.get(index), siblings.last()) {
                (Some(&before), _) => before,
                (None, Some(&last)) => last + 1,
                // Empty column: keep the global slot.
                (None, None) => from.min(next.tasks.len()),
            };
            next.tasks.insert(at, task);
        }

        BoardAction::ColumnsLoad(phase) => match phase {
            LoadPhase::Pending => begin_load(&mut next),
            LoadPhase::Fulfilled(columns) => {
                next.is_loading = false;
                next.columns = dedup_by_id(columns, |c: &Column| &c.id, "column");
            }
            LoadPhase::Rejected(message) => fail_load(&mut next, message),
        },

        BoardAction::TasksLoad(phase) => match phase {
            LoadPhase::Pending => begin_load(&mut next),
            LoadPhase::Fulfilled(tasks) => {
                next.is_loading = false;
                next.tasks = dedup_by_id(tasks, |t: &Task| &t.id, "task");
            }
            LoadPhase::Rejected(message) => fail_load(&mut next, message),
        },
    }

    Ok(next)
}

fn begin_load(state: &mut BoardState) {
    state.is_loading = true;
    state.error = None;
}

/// The collection keeps its prior value; only the flags change.
fn fail_load(state: &mut BoardState, message: String) {
    state.is_loading = false;
    state.error = Some(message);
}

fn ensure_unique_columns(columns: &[Column]) -> Result<(), BoardError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(&column.id) {
            return Err(BoardError::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}

fn ensure_unique_tasks(tasks: &[Task]) -> Result<(), BoardError> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(&task.id) {
            return Err(BoardError::DuplicateTask(task.id.clone()));
        }
    }
    Ok(())
}

/// Keep the first occurrence of every id (gateway payloads are not trusted).
fn dedup_by_id<T, K, F>(items: Vec<T>, key: F, kind: &'static str) -> Vec<T>
where
    K: Eq + Hash + Clone + std::fmt::Display,
    F: Fn(&T) -> &K,
{
    let mut seen: HashSet<K> = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let id = key(&item);
        if seen.insert(id.clone()) {
            kept.push(item);
        } else {
            warn!(kind, id = %id, "dropping duplicate id from gateway payload");
        }
    }
    kept
}
