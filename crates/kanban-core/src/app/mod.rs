//! App - アプリケーションロジック
//!
//! # 含まれるもの
//! - **resolver**: ドラッグ先から新しい並び順を計算する純粋関数
//! - **session**: DragController（start / over / end / cancel の状態機械）
//! - **sensor**: PointerSensor（click と drag の区別）
//! - **loader**: BoardLoader（gateway からの初期ロード）
//! - **config**: BoardConfig

pub mod config;
pub mod loader;
pub mod resolver;
pub mod sensor;
pub mod session;

pub use self::config::{BoardConfig, ConfigError};
pub use self::loader::BoardLoader;
pub use self::resolver::{Resolution, resolve_end, resolve_over};
pub use self::sensor::PointerSensor;
pub use self::session::{DragController, DragOutcome, DragSession};
