//! kanban-core
//!
//! Drag-and-drop reordering engine for a Kanban board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, Column, Task, BoardState, DragEvent, errors）
//! - **ports**: 抽象化レイヤー（BoardGateway, Clock, IdGenerator）
//! - **store**: 正本（BoardAction, reducer, BoardStore）
//! - **app**: アプリケーションロジック（resolver, DragController, PointerSensor, BoardLoader, config）
//! - **impls**: 実装（InMemoryGateway, JsonFileGateway）
//!
//! # データの流れ
//! ```text
//! pointer -> PointerSensor -> DragEvent -> DragController
//!                                              | resolve_over / resolve_end
//!                                              v
//! BoardGateway -> BoardLoader ---------> BoardStore (watch) -> subscribers
//! ```

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod store;

pub use app::{BoardConfig, BoardLoader, DragController, DragOutcome, PointerSensor};
pub use domain::{BoardState, Column, ColumnId, DragEvent, DragRef, Task, TaskId};
pub use store::{BoardAction, BoardStore};
