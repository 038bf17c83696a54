//! Ordering helpers shared by the reducer and the resolver.
//!
//! Lookups are first-match in sequence order. Moves use remove-then-insert
//! semantics: the moved element lands exactly at the target index and every
//! element in between shifts one slot toward the vacated position.

use crate::domain::{Column, ColumnId, Task, TaskId};

/// Move `items[from]` to index `to` (remove, then insert).
///
/// `to` past the end appends. An out-of-range `from` leaves the sequence
/// untouched.
pub fn array_move<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= items.len() {
        return items;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    items
}

pub fn column_index(columns: &[Column], id: &ColumnId) -> Option<usize> {
    columns.iter().position(|c| &c.id == id)
}

pub fn task_index(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}
