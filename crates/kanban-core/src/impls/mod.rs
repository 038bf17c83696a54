//! Impls - BoardGateway の実装
//!
//! # 含まれる実装
//! - **InMemoryGateway**: 開発用・テスト用（失敗・遅延の注入つき）
//! - **JsonFileGateway**: `{ columns, tasks }` 形式の JSON ファイル

pub mod inmem_gateway;
pub mod json_file;

pub use self::inmem_gateway::InMemoryGateway;
pub use self::json_file::JsonFileGateway;
