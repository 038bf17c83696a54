//! BoardGateway port - the remote sync gateway.
//!
//! Two read operations, each returning a complete ordered sequence or a
//! failure. No pagination, no partial results. The gateway is consulted only
//! at load time; drag results are optimistic and never re-fetched.

use async_trait::async_trait;

use crate::domain::{Column, GatewayError, Task};

#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Fetch every column, in board order.
    async fn fetch_columns(&self) -> Result<Vec<Column>, GatewayError>;

    /// Fetch every task, in global order.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, GatewayError>;
}
