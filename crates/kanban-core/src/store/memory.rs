//! In-memory board store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::action::BoardAction;
use super::reducer::reduce;
use crate::domain::{
    BoardError, BoardState, Column, ColumnChanges, ColumnId, Task, TaskChanges, TaskId,
};
use crate::ports::IdGenerator;

/// Shared, observable board state.
///
/// Design:
/// - The `watch` channel holds the single source of truth. Every handle and
///   every receiver sees the same current value, so a drag session that
///   outlives a refresh always reads the refreshed collections.
/// - Mutation goes through `dispatch` only. The reducer runs against the
///   value inside the channel and the result replaces it in one step.
/// - Subscribers are woken only when the state actually changed.
#[derive(Clone)]
pub struct BoardStore {
    tx: Arc<watch::Sender<BoardState>>,
    verify_invariants: bool,
}

impl BoardStore {
    pub fn new(initial: BoardState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            verify_invariants: cfg!(debug_assertions),
        }
    }

    /// Verify parents and id uniqueness after every non-hydration commit.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> BoardState {
        self.tx.borrow().clone()
    }

    /// Run `f` against the current state without cloning it.
    ///
    /// Do not dispatch from inside `f`.
    pub fn read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Read-only view for renderers.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.tx.subscribe()
    }

    /// Apply one action atomically.
    ///
    /// Returns `Ok(true)` if the state changed, `Ok(false)` for a no-op
    /// commit. On error the state is unchanged.
    pub fn dispatch(&self, action: BoardAction) -> Result<bool, BoardError> {
        self.dispatch_with(|_| Some(action))
    }

    /// Plan an action from the current state and apply it in the same step.
    ///
    /// `plan` and the reducer run under one write lock, so nothing can land
    /// between reading the collections and committing the result. `None`
    /// means there is nothing to do.
    pub fn dispatch_with(
        &self,
        plan: impl FnOnce(&BoardState) -> Option<BoardAction>,
    ) -> Result<bool, BoardError> {
        let verify = self.verify_invariants;
        let mut name = None;
        let mut result = Ok(false);

        self.tx.send_if_modified(|state| {
            let Some(action) = plan(state) else {
                return false;
            };
            let action_name = action.name();
            let hydration = action.is_hydration();
            name = Some(action_name);

            match reduce(state, action) {
                Ok(next) if next == *state => false,
                Ok(next) => {
                    if verify
                        && !hydration
                        && state.orphaned_tasks().is_empty()
                        && let Err(violation) = next.check_invariants()
                    {
                        // Reaching this is a reducer bug, not a user error.
                        panic!("{action_name} broke a board invariant: {violation}");
                    }
                    *state = next;
                    result = Ok(true);
                    true
                }
                Err(e) => {
                    result = Err(e);
                    false
                }
            }
        });

        if let Some(action) = name {
            match &result {
                Ok(changed) => debug!(action, changed, "dispatched"),
                Err(e) => debug!(action, error = %e, "refused"),
            }
        }
        result
    }

    pub fn add_column(&self, column: Column) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::AddColumn(column))
    }

    /// Create a column with a fresh id.
    pub fn create_column(
        &self,
        ids: &dyn IdGenerator,
        title: impl Into<String>,
    ) -> Result<ColumnId, BoardError> {
        let id = ids.generate_column_id();
        self.add_column(Column::new(id.clone(), title))?;
        Ok(id)
    }

    pub fn update_column(&self, id: ColumnId, changes: ColumnChanges) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::UpdateColumn { id, changes })
    }

    pub fn remove_column(&self, id: ColumnId) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::RemoveColumn(id))
    }

    pub fn replace_columns(&self, columns: Vec<Column>) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::ReplaceColumns(columns))
    }

    pub fn move_column(&self, from: usize, to: usize) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::MoveColumn { from, to })
    }

    pub fn add_task(&self, task: Task) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::AddTask(task))
    }

    /// Create a task with a fresh id at the end of `column_id`.
    pub fn create_task(
        &self,
        ids: &dyn IdGenerator,
        column_id: ColumnId,
        title: impl Into<String>,
    ) -> Result<TaskId, BoardError> {
        let id = ids.generate_task_id();
        self.add_task(Task::new(id.clone(), column_id, title))?;
        Ok(id)
    }

    pub fn update_task(&self, id: TaskId, changes: TaskChanges) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::UpdateTask { id, changes })
    }

    pub fn remove_task(&self, id: TaskId) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::RemoveTask(id))
    }

    pub fn replace_tasks(&self, tasks: Vec<Task>) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::ReplaceTasks(tasks))
    }

    pub fn reassign_parent(&self, task_id: TaskId, column_id: ColumnId) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::ReassignParent { task_id, column_id })
    }

    pub fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    ) -> Result<bool, BoardError> {
        self.dispatch(BoardAction::MoveTask {
            task_id,
            column_id,
            index,
        })
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(BoardState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{SystemClock, UlidGenerator};

    fn store() -> BoardStore {
        BoardStore::new(BoardState::new(
            vec![Column::new(1, "A"), Column::new(2, "B")],
            vec![Task::new("t1", 1, "one"), Task::new("t2", 2, "two")],
        ))
    }

    #[test]
    fn refused_dispatch_keeps_state() {
        let store = store();
        let before = store.snapshot();

        let err = store.add_task(Task::new("t3", 9, "lost")).unwrap_err();

        assert_eq!(err, BoardError::ColumnNotFound(ColumnId::new(9)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn clones_share_one_state() {
        let store = store();
        let other = store.clone();

        other.remove_task(TaskId::new("t1")).unwrap();

        assert!(store.read(|s| s.task(&TaskId::new("t1")).is_none()));
    }

    #[test]
    fn delete_column_cascades_atomically() {
        let store = store();
        let rx = store.subscribe();

        store.remove_column(ColumnId::new(2)).unwrap();

        let seen = rx.borrow().clone();
        assert_eq!(seen.columns, vec![Column::new(1, "A")]);
        assert_eq!(seen.tasks, vec![Task::new("t1", 1, "one")]);
        assert!(seen.check_invariants().is_ok());
    }

    #[tokio::test]
    async fn subscribers_are_not_woken_by_noop_commits() {
        let store = store();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        let same = store.snapshot().tasks;
        assert_eq!(store.replace_tasks(same), Ok(false));
        assert!(!rx.has_changed().unwrap());

        assert_eq!(
            store.update_task(TaskId::new("t1"), TaskChanges::title("renamed")),
            Ok(true)
        );
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().tasks[0].title, "renamed");
    }

    #[test]
    fn create_assigns_fresh_ids() {
        let store = BoardStore::default();
        let ids = UlidGenerator::new(SystemClock);

        let column = store.create_column(&ids, "Todo").unwrap();
        let first = store.create_task(&ids, column.clone(), "Untitled").unwrap();
        let second = store.create_task(&ids, column.clone(), "Untitled").unwrap();

        assert_ne!(first, second);
        assert_eq!(store.read(|s| s.task_ids_in_column(&column)), vec![first, second]);
    }
}
