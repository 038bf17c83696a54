//! Drag session events and references.
//!
//! These are what the pointer layer raises; the engine never sees raw
//! coordinates here (see `app::sensor` for the activation step).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ColumnId, TaskId};

/// Which kind of element a drag reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    Column,
    Task,
}

/// A dragged element or a drop target: `{ kind, id }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DragRef {
    Column(ColumnId),
    Task(TaskId),
}

impl DragRef {
    pub fn column(id: impl Into<ColumnId>) -> Self {
        DragRef::Column(id.into())
    }

    pub fn task(id: impl Into<TaskId>) -> Self {
        DragRef::Task(id.into())
    }

    pub fn kind(&self) -> DragKind {
        match self {
            DragRef::Column(_) => DragKind::Column,
            DragRef::Task(_) => DragKind::Task,
        }
    }
}

impl fmt::Display for DragRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragRef::Column(id) => write!(f, "{}:{id}", id.kind()),
            DragRef::Task(id) => write!(f, "{}:{id}", id.kind()),
        }
    }
}

/// One event of the session stream.
///
/// `target == None` means the pointer is over (or was released over) no
/// valid drop target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragEvent {
    Start {
        dragged: DragRef,
    },
    Over {
        dragged: DragRef,
        #[serde(default)]
        target: Option<DragRef>,
    },
    End {
        dragged: DragRef,
        #[serde(default)]
        target: Option<DragRef>,
    },
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refs_of_different_kinds_never_match() {
        // A column and a task sharing a raw token are different elements.
        assert_ne!(DragRef::column(1), DragRef::task(1));
        assert_eq!(DragRef::task("t1"), DragRef::task("t1"));
        assert_eq!(DragRef::column(1).kind(), DragKind::Column);
        assert_eq!(DragRef::task(1).kind(), DragKind::Task);
    }

    #[test]
    fn refs_display_kind_and_token() {
        assert_eq!(DragRef::column(7).to_string(), "column:7");
        assert_eq!(DragRef::task("t1").to_string(), "task:t1");
    }

    #[test]
    fn events_parse_from_the_script_format() {
        let events: Vec<DragEvent> = serde_json::from_str(
            r#"[
                {"type":"start","dragged":{"kind":"task","id":"t1"}},
                {"type":"over","dragged":{"kind":"task","id":"t1"},"target":{"kind":"column","id":2}},
                {"type":"end","dragged":{"kind":"task","id":"t1"}},
                {"type":"cancel"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                DragEvent::Start {
                    dragged: DragRef::task("t1")
                },
                DragEvent::Over {
                    dragged: DragRef::task("t1"),
                    target: Some(DragRef::column(2)),
                },
                DragEvent::End {
                    dragged: DragRef::task("t1"),
                    target: None,
                },
                DragEvent::Cancel,
            ]
        );
    }
}
