//! Reorder resolver: where does the dragged element go?
//!
//! Resolvers are pure functions: given the dragged element, the element under
//! the pointer and the current collections, they return the new ordering
//! without touching the store. The session controller decides when to
//! commit it.
//!
//! Cases:
//! - column over column: list-move the dragged column to the target's index.
//! - task over task: take the target's `column_id`, then list-move the
//!   dragged task to the target's index in the global sequence. One commit
//!   covers both the reparent and the reorder.
//! - task over column: take the column's id, keep the global index.
//! - anything else (column over task, self-drop, no target, unknown id): no
//!   resolution.

use tracing::debug;

use crate::domain::{Column, ColumnId, DragRef, Task, TaskId};
use crate::store::BoardAction;
use crate::store::ordering::{array_move, column_index, task_index};

/// The new ordering for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Columns(Vec<Column>),
    Tasks(Vec<Task>),
}

impl Resolution {
    /// Whole-collection replacement, committed in one dispatch.
    pub fn into_action(self) -> BoardAction {
        match self {
            Resolution::Columns(columns) => BoardAction::ReplaceColumns(columns),
            Resolution::Tasks(tasks) => BoardAction::ReplaceTasks(tasks),
        }
    }
}

/// Live-preview resolution for a drag-over tick.
pub fn resolve_over(
    dragged: &DragRef,
    target: Option<&DragRef>,
    columns: &[Column],
    tasks: &[Task],
) -> Option<Resolution> {
    let target = target?;
    if dragged == target {
        return None;
    }

    match (dragged, target) {
        (DragRef::Column(dragged), DragRef::Column(target)) => {
            move_column(dragged, target, columns).map(Resolution::Columns)
        }
        (DragRef::Task(dragged), DragRef::Task(target)) => {
            move_task_over_task(dragged, target, tasks).map(Resolution::Tasks)
        }
        (DragRef::Task(dragged), DragRef::Column(target)) => {
            move_task_into_column(dragged, target, columns, tasks).map(Resolution::Tasks)
        }
        (DragRef::Column(_), DragRef::Task(_)) => {
            debug!(
                %dragged,
                %target,
                dragged_kind = ?dragged.kind(),
                target_kind = ?target.kind(),
                "not a drop target for this kind"
            );
            None
        }
    }
}

/// Final resolution at drop.
///
/// Same algorithm as `resolve_over`; a drop where the last over-event left
/// the element resolves to the already committed ordering.
pub fn resolve_end(
    dragged: &DragRef,
    target: Option<&DragRef>,
    columns: &[Column],
    tasks: &[Task],
) -> Option<Resolution> {
    resolve_over(dragged, target, columns, tasks)
}

fn move_column(dragged: &ColumnId, target: &ColumnId, columns: &[Column]) -> Option<Vec<Column>> {
    let (Some(from), Some(to)) = (column_index(columns, dragged), column_index(columns, target))
    else {
        debug!(%dragged, %target, "column lookup failed, skipping");
        return None;
    };
    Some(array_move(columns.to_vec(), from, to))
}

fn move_task_over_task(dragged: &TaskId, target: &TaskId, tasks: &[Task]) -> Option<Vec<Task>> {
    let (Some(from), Some(to)) = (task_index(tasks, dragged), task_index(tasks, target)) else {
        debug!(%dragged, %target, "task lookup failed, skipping");
        return None;
    };

    let mut next = tasks.to_vec();
    // Reparent before moving, even when the columns already match.
    next[from].column_id = next[to].column_id.clone();
    Some(array_move(next, from, to))
}

fn move_task_into_column(
    dragged: &TaskId,
    target: &ColumnId,
    columns: &[Column],
    tasks: &[Task],
) -> Option<Vec<Task>> {
    let (Some(from), Some(_)) = (task_index(tasks, dragged), column_index(columns, target)) else {
        debug!(%dragged, %target, "task or column lookup failed, skipping");
        return None;
    };

    let mut next = tasks.to_vec();
    next[from].column_id = target.clone();
    Some(next)
}
