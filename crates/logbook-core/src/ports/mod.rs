//! Ports - 抽象化レイヤー
//!
//! このモジュールはディスパッチエンジンと外部（出力先・時刻）との
//! 境界を trait として定義します。
//!
//! - **Handler**: レコードの出力先（console, writer, file など）
//! - **Clock**: レコードのタイムスタンプ

pub mod clock;
pub mod handler;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::handler::{Handler, HandlerOptions, Lifecycle};
