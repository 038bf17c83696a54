//! BoardLoader - 初期ロード（remote sync）
//!
//! # 学習ポイント
//! - async-trait の gateway を `Arc<dyn ...>` で保持する
//! - 1 リクエスト = Pending -> Fulfilled / Rejected の 3 段階 dispatch
//! - `tokio::join!` による並行ロード

use std::sync::Arc;

use tracing::{info, warn};

use super::config::BoardConfig;
use crate::domain::GatewayError;
use crate::ports::BoardGateway;
use crate::store::{BoardAction, BoardStore, LoadPhase};

/// Hydrates a `BoardStore` from a `BoardGateway`.
///
/// Design:
/// - Columns and tasks are fetched independently and may resolve in any
///   order. Each one replaces only its own collection.
/// - A failed load keeps the previously loaded collection and records the
///   error message on the board.
pub struct BoardLoader {
    store: BoardStore,
    gateway: Arc<dyn BoardGateway>,
    columns_error: String,
    tasks_error: String,
}

impl BoardLoader {
    pub fn new(store: BoardStore, gateway: Arc<dyn BoardGateway>) -> Self {
        Self::with_config(store, gateway, &BoardConfig::default())
    }

    pub fn with_config(
        store: BoardStore,
        gateway: Arc<dyn BoardGateway>,
        config: &BoardConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            columns_error: config.columns_load_error.clone(),
            tasks_error: config.tasks_load_error.clone(),
        }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Fetch the column list and replace `columns`.
    ///
    /// Returns the error after it has been recorded on the board.
    pub async fn load_columns(&self) -> Result<(), GatewayError> {
        self.commit(BoardAction::ColumnsLoad(LoadPhase::Pending));

        match self.gateway.fetch_columns().await {
            Ok(columns) => {
                info!(count = columns.len(), "columns loaded");
                self.commit(BoardAction::ColumnsLoad(LoadPhase::Fulfilled(columns)));
                Ok(())
            }
            Err(e) => {
                let message = rejection_message(&e, &self.columns_error);
                warn!(error = %e, "column load failed");
                self.commit(BoardAction::ColumnsLoad(LoadPhase::Rejected(message)));
                Err(e)
            }
        }
    }

    /// Fetch the task list and replace `tasks`.
    pub async fn load_tasks(&self) -> Result<(), GatewayError> {
        self.commit(BoardAction::TasksLoad(LoadPhase::Pending));

        match self.gateway.fetch_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.commit(BoardAction::TasksLoad(LoadPhase::Fulfilled(tasks)));
                Ok(())
            }
            Err(e) => {
                let message = rejection_message(&e, &self.tasks_error);
                warn!(error = %e, "task load failed");
                self.commit(BoardAction::TasksLoad(LoadPhase::Rejected(message)));
                Err(e)
            }
        }
    }

    /// Both loads, concurrently. Both run to completion even if one fails.
    pub async fn load_all(&self) -> (Result<(), GatewayError>, Result<(), GatewayError>) {
        tokio::join!(self.load_columns(), self.load_tasks())
    }

    fn commit(&self, action: BoardAction) {
        // Load phases are never refused by the reducer.
        if let Err(e) = self.store.dispatch(action) {
            warn!(error = %e, "load phase refused");
        }
    }
}

fn rejection_message(error: &GatewayError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
