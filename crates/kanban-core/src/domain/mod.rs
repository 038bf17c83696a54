//! Domain model (ids, columns, tasks, board state, drag events, errors).

pub mod board;
pub mod column;
pub mod drag;
pub mod errors;
pub mod ids;
pub mod task;

pub use board::BoardState;
pub use column::{Column, ColumnChanges};
pub use drag::{DragEvent, DragKind, DragRef};
pub use errors::{BoardError, GatewayError, InvariantViolation};
pub use ids::{ColumnId, Id, IdMarker, RawId, TaskId};
pub use task::{Task, TaskChanges};
