//! Domain identifiers (strongly-typed IDs).
//!
//! # Opaque token + phantom marker
//! Ids arrive from the gateway as either integers or strings, and locally
//! created entities get ULID strings. `RawId` keeps that opaque token;
//! `Id<T>` tags it with a marker type so a `ColumnId` can never be passed
//! where a `TaskId` is expected.
//!
//! ## Phantom Type パターン
//! `T` は実行時には使わない（PhantomData）マーカー型で、
//! コンパイル時の型安全性だけを提供します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// The opaque identifier token.
///
/// Serialized untagged, so `1` and `"t1"` are both accepted on the wire.
/// Ordering is total (integers sort before strings) but carries no meaning
/// for board order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{n}"),
            RawId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        RawId::Int(n)
    }
}

impl From<i32> for RawId {
    fn from(n: i32) -> Self {
        RawId::Int(i64::from(n))
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Str(s.to_string())
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        RawId::Str(s)
    }
}

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Entity kind, shown in log lines (`column:1`, `task:t1`).
    fn kind() -> &'static str;
}

/// Generic id: an opaque token tagged with its entity kind.
///
/// # 例
/// ```ignore
/// let column: ColumnId = Id::new(1);
/// let task: TaskId = Id::new("t1");
/// // column と task は異なる型なので、混同できない
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T: IdMarker> {
    raw: RawId,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(raw: impl Into<RawId>) -> Self {
        Self {
            raw: raw.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_raw(&self) -> &RawId {
        &self.raw
    }

    /// Entity kind of this id (`"column"` / `"task"`).
    pub fn kind(&self) -> &'static str {
        T::kind()
    }
}

impl<T: IdMarker> From<i64> for Id<T> {
    fn from(n: i64) -> Self {
        Self::new(n)
    }
}

impl<T: IdMarker> From<i32> for Id<T> {
    fn from(n: i32) -> Self {
        Self::new(n)
    }
}

impl<T: IdMarker> From<&str> for Id<T> {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<T: IdMarker> From<String> for Id<T> {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::new(ulid.to_string())
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Column のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnMarker {}

impl IdMarker for ColumnMarker {
    fn kind() -> &'static str {
        "column"
    }
}

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskMarker {}

impl IdMarker for TaskMarker {
    fn kind() -> &'static str {
        "task"
    }
}

/// Identifier of a Column.
pub type ColumnId = Id<ColumnMarker>;

/// Identifier of a Task.
pub type TaskId = Id<TaskMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_integers_and_strings() {
        let column = ColumnId::new(1);
        let task = TaskId::new("t1");

        assert_eq!(column.as_raw(), &RawId::Int(1));
        assert_eq!(task.as_raw(), &RawId::Str("t1".to_string()));
        assert_eq!(column.to_string(), "1");
        assert_eq!(task.to_string(), "t1");

        // let _: ColumnId = task; // <- does not compile
    }

    #[test]
    fn ids_serialize_as_the_bare_token() {
        let column = ColumnId::new(7);
        let task = TaskId::new("abc");

        assert_eq!(serde_json::to_string(&column).unwrap(), "7");
        assert_eq!(serde_json::to_string(&task).unwrap(), "\"abc\"");

        let back: ColumnId = serde_json::from_str("7").unwrap();
        assert_eq!(back, column);
        let back: TaskId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn ids_know_their_entity_kind() {
        assert_eq!(ColumnId::new(1).kind(), "column");
        assert_eq!(TaskId::new(1).kind(), "task");
    }

    #[test]
    fn integer_and_string_tokens_are_different_ids() {
        assert_ne!(ColumnId::new(1), ColumnId::new("1"));
    }

    #[test]
    fn ulid_ids_become_string_tokens() {
        let ulid = Ulid::new();
        let id: TaskId = ulid.into();
        assert_eq!(id.as_raw(), &RawId::Str(ulid.to_string()));
    }
}
