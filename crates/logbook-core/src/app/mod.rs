//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてロギングの本体を実装します。
//!
//! # 主要コンポーネント
//! - **Logger**: レベル判定と handler への fan-out
//! - **LogConfig / LoggerConfig**: `Registry::setup` に渡す設定
//! - **Registry**: handler / logger テーブル（`setup` で丸ごと再構築）

pub mod config;
pub mod logger;
pub mod registry;

pub use self::config::{LogConfig, LoggerConfig};
pub use self::logger::Logger;
pub use self::registry::Registry;
