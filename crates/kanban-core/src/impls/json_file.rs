//! JsonFileGateway - JSON ファイルからボードを読む BoardGateway
//!
//! File format:
//! ```json
//! {
//!   "columns": [{ "id": 1, "title": "Todo" }],
//!   "tasks": [{ "id": "t1", "column_id": 1, "title": "Write docs" }]
//! }
//! ```
//! Either key may be missing; it reads as an empty list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Column, GatewayError, Task};
use crate::ports::BoardGateway;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoardFile {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

/// Reads the file on every fetch, so edits show up on the next load.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<BoardFile, GatewayError> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[async_trait]
impl BoardGateway for JsonFileGateway {
    async fn fetch_columns(&self) -> Result<Vec<Column>, GatewayError> {
        Ok(self.read().await?.columns)
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        Ok(self.read().await?.tasks)
    }
}
