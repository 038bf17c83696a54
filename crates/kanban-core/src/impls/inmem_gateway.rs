//! InMemoryGateway - 開発用・テスト用の BoardGateway
//!
//! # 学習ポイント
//! - Builder 風のメソッドで失敗・遅延を注入する
//! - tokio::time::sleep による非同期レイテンシの再現

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Column, GatewayError, Task};
use crate::ports::BoardGateway;

/// Serves fixed collections.
///
/// # 使用例
/// ```ignore
/// let gateway = InMemoryGateway::new(columns, tasks)
///     .with_tasks_latency(Duration::from_millis(20))
///     .fail_columns(GatewayError::Rejected("offline".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    columns_error: Option<GatewayError>,
    tasks_error: Option<GatewayError>,
    columns_latency: Duration,
    tasks_latency: Duration,
}

impl InMemoryGateway {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self {
            columns,
            tasks,
            ..Self::default()
        }
    }

    /// A small three-column board.
    pub fn sample() -> Self {
        Self::new(
            vec![
                Column::new(1, "Todo"),
                Column::new(2, "In progress"),
                Column::new(3, "Done"),
            ],
            vec![
                Task::new(1, 1, "Write the parser"),
                Task::new(2, 1, "Add tests"),
                Task::new(3, 2, "Review the store"),
                Task::new(4, 3, "Set up the workspace"),
            ],
        )
    }

    pub fn fail_columns(mut self, error: GatewayError) -> Self {
        self.columns_error = Some(error);
        self
    }

    pub fn fail_tasks(mut self, error: GatewayError) -> Self {
        self.tasks_error = Some(error);
        self
    }

    pub fn with_columns_latency(mut self, latency: Duration) -> Self {
        self.columns_latency = latency;
        self
    }

    pub fn with_tasks_latency(mut self, latency: Duration) -> Self {
        self.tasks_latency = latency;
        self
    }
}

async fn respond<T: Clone>(
    latency: Duration,
    error: &Option<GatewayError>,
    value: &[T],
) -> Result<Vec<T>, GatewayError> {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    match error {
        Some(e) => Err(e.clone()),
        None => Ok(value.to_vec()),
    }
}

#[async_trait]
impl BoardGateway for InMemoryGateway {
    async fn fetch_columns(&self) -> Result<Vec<Column>, GatewayError> {
        respond(self.columns_latency, &self.columns_error, &self.columns).await
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        respond(self.tasks_latency, &self.tasks_error, &self.tasks).await
    }
}
