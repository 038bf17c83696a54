//! Drag session controller.
//!
//! # フロー
//! 1. Start: remember which element is being dragged (plus a snapshot for
//!    the overlay). The store is not touched.
//! 2. Over: resolve against the store's *current* collections and commit the
//!    live preview immediately.
//! 3. End: resolve once more and commit, then go back to Idle.
//!    Cancel: go back to Idle without committing.
//!
//! Resolution always happens inside `BoardStore::dispatch_with`, so a load
//! that replaced the collections mid-drag is seen by the very next event.
//!
//! List-move is not idempotent: resolving the same target twice against the
//! already-moved sequence moves the element back. The controller remembers
//! the ordering its last resolution left behind and treats a same-target
//! event as a repeat while the board still has that ordering. Commits that
//! leave the ordering alone (title edits, load flags) do not break this.

use tracing::{debug, info, warn};

use super::resolver::{Resolution, resolve_end, resolve_over};
use crate::domain::{Column, ColumnId, DragEvent, DragRef, Task, TaskId};
use crate::store::BoardStore;

/// Session state.
///
/// State transitions:
/// - Idle -> DraggingColumn / DraggingTask (start)
/// - Dragging* -> Dragging* (over)
/// - Dragging* -> Idle (end / cancel)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    DraggingColumn { id: ColumnId, snapshot: Column },
    DraggingTask { id: TaskId, snapshot: Task },
}

impl DragSession {
    fn dragged(&self) -> Option<DragRef> {
        match self {
            DragSession::Idle => None,
            DragSession::DraggingColumn { id, .. } => Some(DragRef::Column(id.clone())),
            DragSession::DraggingTask { id, .. } => Some(DragRef::Task(id.clone())),
        }
    }
}

/// What an event did. Only used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Started,
    /// Start refused: a session is already active, or the element is gone.
    Rejected,
    /// A new ordering was committed.
    Committed,
    /// Nothing to commit (no target, self-drop, lookup failure, repeat).
    Unchanged,
    Dropped { committed: bool },
    Cancelled,
    /// The event does not belong to the active session.
    Ignored,
}

/// Ids and parents of both sequences. Titles and load flags are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardOrder {
    columns: Vec<ColumnId>,
    tasks: Vec<(TaskId, ColumnId)>,
}

impl BoardOrder {
    fn of(columns: &[Column], tasks: &[Task]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.id.clone()).collect(),
            tasks: tasks
                .iter()
                .map(|t| (t.id.clone(), t.column_id.clone()))
                .collect(),
        }
    }
}

/// Target of the last resolved over-event and the ordering it left behind.
#[derive(Debug, Clone)]
struct LastResolution {
    target: DragRef,
    order: BoardOrder,
}

pub struct DragController {
    store: BoardStore,
    session: DragSession,
    last: Option<LastResolution>,
}

impl DragController {
    pub fn new(store: BoardStore) -> Self {
        Self {
            store,
            session: DragSession::Idle,
            last: None,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session != DragSession::Idle
    }

    /// Snapshot of the dragged column, for the overlay.
    pub fn active_column(&self) -> Option<&Column> {
        match &self.session {
            DragSession::DraggingColumn { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Snapshot of the dragged task, for the overlay.
    pub fn active_task(&self) -> Option<&Task> {
        match &self.session {
            DragSession::DraggingTask { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { dragged } => self.drag_start(dragged),
            DragEvent::Over { dragged, target } => self.drag_over(&dragged, target.as_ref()),
            DragEvent::End { dragged, target } => self.drag_end(&dragged, target.as_ref()),
            DragEvent::Cancel => self.cancel(),
        }
    }

    pub fn drag_start(&mut self, dragged: DragRef) -> DragOutcome {
        if self.is_dragging() {
            warn!(%dragged, "drag start while a session is active, ignoring");
            return DragOutcome::Rejected;
        }

        let session = self.store.read(|state| match &dragged {
            DragRef::Column(id) => state.column(id).map(|c| DragSession::DraggingColumn {
                id: id.clone(),
                snapshot: c.clone(),
            }),
            DragRef::Task(id) => state.task(id).map(|t| DragSession::DraggingTask {
                id: id.clone(),
                snapshot: t.clone(),
            }),
        });
        let Some(session) = session else {
            debug!(%dragged, kind = ?dragged.kind(), "drag start for an unknown element, ignoring");
            return DragOutcome::Rejected;
        };

        info!(%dragged, "drag session started");
        self.session = session;
        self.last = None;
        DragOutcome::Started
    }

    pub fn drag_over(&mut self, dragged: &DragRef, target: Option<&DragRef>) -> DragOutcome {
        if !self.owns(dragged) {
            return DragOutcome::Ignored;
        }
        let Some(target) = target else {
            self.last = None;
            return DragOutcome::Unchanged;
        };

        if self.commit(dragged, target, false) {
            DragOutcome::Committed
        } else {
            DragOutcome::Unchanged
        }
    }

    pub fn drag_end(&mut self, dragged: &DragRef, target: Option<&DragRef>) -> DragOutcome {
        if !self.owns(dragged) {
            return DragOutcome::Ignored;
        }

        let committed = match target {
            Some(target) => self.commit(dragged, target, true),
            None => false,
        };

        info!(%dragged, committed, "drag session ended");
        self.reset();
        DragOutcome::Dropped { committed }
    }

    pub fn cancel(&mut self) -> DragOutcome {
        if !self.is_dragging() {
            return DragOutcome::Ignored;
        }
        info!("drag session cancelled");
        self.reset();
        DragOutcome::Cancelled
    }

    fn owns(&self, dragged: &DragRef) -> bool {
        match self.session.dragged() {
            Some(active) if &active == dragged => true,
            Some(active) => {
                debug!(%dragged, %active, "event for another element, ignoring");
                false
            }
            None => {
                debug!(%dragged, "event without an active session, ignoring");
                false
            }
        }
    }

    /// Resolve against the current board and commit, in one store step.
    ///
    /// Same target as the last resolution, with the board still in the
    /// ordering that resolution left behind, is a repeat and commits nothing.
    fn commit(&mut self, dragged: &DragRef, target: &DragRef, at_drop: bool) -> bool {
        let last = self.last.as_ref();
        let mut left_behind = None;

        let result = self.store.dispatch_with(|state| {
            let current = BoardOrder::of(&state.columns, &state.tasks);
            if let Some(last) = last
                && &last.target == target
                && last.order == current
            {
                debug!(%dragged, %target, "repeat of the last resolution, skipping");
                left_behind = Some(current);
                return None;
            }

            let resolution = if at_drop {
                resolve_end(dragged, Some(target), &state.columns, &state.tasks)
            } else {
                resolve_over(dragged, Some(target), &state.columns, &state.tasks)
            };
            left_behind = Some(match &resolution {
                Some(Resolution::Columns(columns)) => BoardOrder::of(columns, &state.tasks),
                Some(Resolution::Tasks(tasks)) => BoardOrder::of(&state.columns, tasks),
                None => current,
            });
            resolution.map(Resolution::into_action)
        });

        match result {
            Ok(changed) => {
                debug!(%dragged, %target, changed, "resolved");
                self.last = left_behind.map(|order| LastResolution {
                    target: target.clone(),
                    order,
                });
                changed
            }
            Err(e) => {
                // Raced with another change; the gesture carries on.
                warn!(%dragged, %target, error = %e, "resolution refused by the store");
                self.last = None;
                false
            }
        }
    }

    fn reset(&mut self) {
        self.session = DragSession::Idle;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardState, ColumnChanges};
    use crate::store::{BoardAction, LoadPhase};

    fn store() -> BoardStore {
        BoardStore::new(BoardState::new(
            vec![Column::new(1, "A"), Column::new(2, "B"), Column::new(3, "C")],
            vec![
                Task::new("t1", 1, "one"),
                Task::new("t2", 2, "two"),
                Task::new("t3", 1, "three"),
            ],
        ))
    }

    fn ids(store: &BoardStore) -> Vec<String> {
        store.read(|s| s.tasks.iter().map(|t| t.id.to_string()).collect())
    }

    #[test]
    fn start_records_snapshot_without_touching_the_store() {
        let store = store();
        let before = store.snapshot();
        let mut ctl = DragController::new(store.clone());

        assert_eq!(ctl.drag_start(DragRef::task("t2")), DragOutcome::Started);

        assert_eq!(ctl.active_task(), Some(&Task::new("t2", 2, "two")));
        assert_eq!(ctl.active_column(), None);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut ctl = DragController::new(store());
        ctl.drag_start(DragRef::task("t1"));

        assert_eq!(ctl.drag_start(DragRef::column(1)), DragOutcome::Rejected);
        assert_eq!(ctl.active_task().map(|t| t.id.to_string()), Some("t1".to_string()));
    }

    #[test]
    fn start_for_unknown_element_is_rejected() {
        let mut ctl = DragController::new(store());
        assert_eq!(ctl.drag_start(DragRef::task("nope")), DragOutcome::Rejected);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn events_for_other_elements_are_ignored() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        assert_eq!(
            ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2"))),
            DragOutcome::Ignored
        );

        ctl.drag_start(DragRef::task("t1"));
        assert_eq!(
            ctl.drag_over(&DragRef::task("t3"), Some(&DragRef::task("t2"))),
            DragOutcome::Ignored
        );
        assert_eq!(ids(&store), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn column_drag_reorders_on_drop() {
        let store = BoardStore::new(BoardState::new(
            vec![Column::new(1, "A"), Column::new(2, "B")],
            vec![],
        ));
        let mut ctl = DragController::new(store.clone());

        ctl.handle(DragEvent::Start {
            dragged: DragRef::column(1),
        });
        let outcome = ctl.handle(DragEvent::End {
            dragged: DragRef::column(1),
            target: Some(DragRef::column(2)),
        });

        assert_eq!(outcome, DragOutcome::Dropped { committed: true });
        assert_eq!(store.read(|s| s.column_ids()), vec![ColumnId::new(2), ColumnId::new(1)]);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn over_commits_live_preview() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));

        let outcome = ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        assert_eq!(outcome, DragOutcome::Committed);
        assert_eq!(ids(&store), vec!["t2", "t1", "t3"]);
        assert_eq!(
            store.read(|s| s.task(&TaskId::new("t1")).map(|t| t.column_id.clone())),
            Some(ColumnId::new(2))
        );
    }

    #[test]
    fn repeated_over_is_idempotent() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));

        ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));
        let first = store.snapshot();
        let outcome = ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        assert_eq!(outcome, DragOutcome::Unchanged);
        assert_eq!(store.snapshot(), first);
        assert_eq!(
            serde_json::to_string(&store.snapshot()).unwrap(),
            serde_json::to_string(&first).unwrap()
        );
    }

    #[test]
    fn repeat_survives_a_title_edit_in_between() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));
        ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));
        assert_eq!(ids(&store), vec!["t2", "t1", "t3"]);

        store
            .update_column(ColumnId::new(1), ColumnChanges::title("Backlog"))
            .unwrap();
        let outcome = ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        assert_eq!(outcome, DragOutcome::Unchanged);
        assert_eq!(ids(&store), vec!["t2", "t1", "t3"]);
        assert_eq!(
            store.read(|s| s.task(&TaskId::new("t1")).map(|t| t.column_id.clone())),
            Some(ColumnId::new(2))
        );
    }

    #[test]
    fn drop_keeps_preview_when_a_load_starts_mid_drag() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));
        ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));
        let previewed = store.snapshot();

        store
            .dispatch(BoardAction::TasksLoad(LoadPhase::Pending))
            .unwrap();
        let outcome = ctl.drag_end(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        assert_eq!(outcome, DragOutcome::Dropped { committed: false });
        let after = store.snapshot();
        assert_eq!(after.tasks, previewed.tasks);
        assert!(after.is_loading);
    }

    #[test]
    fn drop_on_last_over_target_is_a_noop() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t3"));
        ctl.drag_over(&DragRef::task("t3"), Some(&DragRef::column(3)));
        let previewed = store.snapshot();

        let outcome = ctl.drag_end(&DragRef::task("t3"), Some(&DragRef::column(3)));

        assert_eq!(outcome, DragOutcome::Dropped { committed: false });
        assert_eq!(store.snapshot(), previewed);
    }

    #[test]
    fn self_drop_never_mutates() {
        let store = store();
        let before = store.snapshot();
        let mut ctl = DragController::new(store.clone());

        ctl.drag_start(DragRef::task("t1"));
        assert_eq!(
            ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t1"))),
            DragOutcome::Unchanged
        );
        assert_eq!(
            ctl.drag_end(&DragRef::task("t1"), Some(&DragRef::task("t1"))),
            DragOutcome::Dropped { committed: false }
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn cancel_discards_without_commit() {
        let store = store();
        let before = store.snapshot();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::column(1));

        assert_eq!(ctl.handle(DragEvent::Cancel), DragOutcome::Cancelled);
        assert_eq!(ctl.active_column(), None);
        assert_eq!(store.snapshot(), before);
        assert_eq!(ctl.handle(DragEvent::Cancel), DragOutcome::Ignored);
    }

    #[test]
    fn drop_outside_any_target_commits_nothing_new() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));

        assert_eq!(
            ctl.drag_end(&DragRef::task("t1"), None),
            DragOutcome::Dropped { committed: false }
        );
        assert_eq!(ids(&store), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn resolves_against_collections_replaced_mid_drag() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));
        ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        // A background refresh lands while the pointer is still down.
        store
            .replace_tasks(vec![
                Task::new("t2", 2, "two"),
                Task::new("t3", 1, "three"),
                Task::new("t1", 1, "one"),
            ])
            .unwrap();

        // Same target as before, but the collections changed underneath.
        let outcome = ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2")));

        assert_eq!(outcome, DragOutcome::Committed);
        assert_eq!(ids(&store), vec!["t1", "t2", "t3"]);
        assert!(store.read(|s| s.check_invariants()).is_ok());
    }

    #[test]
    fn element_deleted_mid_drag_degrades_to_noop() {
        let store = store();
        let mut ctl = DragController::new(store.clone());
        ctl.drag_start(DragRef::task("t1"));

        store.remove_task(TaskId::new("t2")).unwrap();
        let after_delete = store.snapshot();

        assert_eq!(
            ctl.drag_over(&DragRef::task("t1"), Some(&DragRef::task("t2"))),
            DragOutcome::Unchanged
        );
        assert_eq!(
            ctl.drag_end(&DragRef::task("t1"), Some(&DragRef::task("t2"))),
            DragOutcome::Dropped { committed: false }
        );
        assert_eq!(store.snapshot(), after_delete);
    }

    #[test]
    fn drag_sequences_preserve_ids_and_parents() {
        let store = store();
        let before = store.snapshot();
        let mut ctl = DragController::new(store.clone());

        let script = vec![
            DragEvent::Start { dragged: DragRef::task("t1") },
            DragEvent::Over { dragged: DragRef::task("t1"), target: Some(DragRef::task("t2")) },
            DragEvent::Over { dragged: DragRef::task("t1"), target: Some(DragRef::column(3)) },
            DragEvent::Over { dragged: DragRef::task("t1"), target: Some(DragRef::task("t3")) },
            DragEvent::End { dragged: DragRef::task("t1"), target: Some(DragRef::column(2)) },
            DragEvent::Start { dragged: DragRef::column(3) },
            DragEvent::Over { dragged: DragRef::column(3), target: Some(DragRef::column(1)) },
            DragEvent::Over { dragged: DragRef::column(3), target: Some(DragRef::task("t1")) },
            DragEvent::End { dragged: DragRef::column(3), target: Some(DragRef::column(2)) },
        ];
        for event in script {
            ctl.handle(event);
            let state = store.snapshot();
            assert!(state.check_invariants().is_ok());
        }

        let after = store.snapshot();
        let mut a: Vec<_> = before.tasks.iter().map(|t| t.id.clone()).collect();
        let mut b: Vec<_> = after.tasks.iter().map(|t| t.id.clone()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
        let mut a = before.column_ids();
        let mut b = after.column_ids();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
