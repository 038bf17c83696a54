//! Column: an ordered container of tasks.
//!
//! A column's position is its index in `BoardState::columns`; there is no
//! rank field to keep in sync.

use serde::{Deserialize, Serialize};

use super::ids::ColumnId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Merge a partial update into this column.
    pub fn apply(&mut self, changes: ColumnChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
    }
}

/// Partial update for a column (`None` = leave unchanged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChanges {
    #[serde(default)]
    pub title: Option<String>,
}

impl ColumnChanges {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}
