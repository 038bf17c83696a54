//! Errors - エラー型と分類
//!
//! - `BoardError`: a store operation was refused; the state is unchanged.
//! - `GatewayError`: the remote sync gateway could not deliver a collection.
//! - `InvariantViolation`: the committed state is inconsistent. This is a
//!   programming error, never a user-facing condition.
//!
//! Resolver lookup failures are deliberately absent: a drag that points at a
//! vanished id is a silent no-op, not an error.

use thiserror::Error;

use super::ids::{ColumnId, TaskId};

/// BoardError はストア操作の失敗（状態は変更されない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {0} already exists")]
    DuplicateColumn(ColumnId),

    #[error("task {0} already exists")]
    DuplicateTask(TaskId),

    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("removing column {column} would orphan task {task}")]
    OrphanTask { task: TaskId, column: ColumnId },

    #[error("index {index} out of bounds (len={len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// GatewayError は初期ロードの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request was rejected; the message is shown to the user as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Payload(e.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(e: std::io::Error) -> Self {
        GatewayError::Io(e.to_string())
    }
}

/// InvariantViolation はボード不変条件の破れ（致命的）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("task {task} references missing column {column}")]
    OrphanTask { task: TaskId, column: ColumnId },

    #[error("column id {0} appears more than once")]
    DuplicateColumn(ColumnId),

    #[error("task id {0} appears more than once")]
    DuplicateTask(TaskId),
}
