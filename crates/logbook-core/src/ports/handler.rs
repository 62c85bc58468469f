//! Handler port - ログ出力先の抽象化
//!
//! 出力先の各 variant（console, writer, file, ユーザー定義）は
//! [`Handler`] を実装します。Logger は registry の handler テーブルへの
//! `Arc<dyn Handler>` 参照を保持し、fan-out 時に [`Handler::handle`] を
//! 同期的に呼び出します。

use async_trait::async_trait;

use crate::domain::{Formatter, Level, LogError, LogRecord, is_enabled};

/// Lifecycle of a handler.
///
/// ```text
/// Uninitialized --setup--> Ready --destroy--> Destroyed
///                            ^                    |
///                            +-------setup--------+
/// ```
///
/// A destroyed handler may be set up again, which is what happens when the
/// same handler instance appears in two consecutive registry configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready,
    Destroyed,
}

impl Lifecycle {
    /// Guard for `setup()`: a Ready handler must not be set up twice.
    pub fn check_setup(self) -> Result<(), LogError> {
        match self {
            Lifecycle::Ready => Err(LogError::AlreadySetUp),
            Lifecycle::Uninitialized | Lifecycle::Destroyed => Ok(()),
        }
    }
}

/// Options shared by all handler variants.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    pub level: Level,
    pub formatter: Formatter,
}

impl HandlerOptions {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            formatter: Formatter::default(),
        }
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses the level by name, e.g. `HandlerOptions::named("DEBUG")`.
    pub fn named(level: &str) -> Result<Self, LogError> {
        Ok(Self::new(level.parse()?))
    }
}

/// Handler はフィルタ済みのレコードを受け取って出力する
///
/// # 契約
/// - `setup`: `Ready` へ遷移。I/O を伴ってよい（await される）
/// - `handle`: [`Handler::level`] 未満は無視。panic してはいけない。
///   `destroy` 後は no-op
/// - `destroy`: sink を解放。二回目以降は no-op
///
/// # Object Safety
/// - `#[async_trait]` により `dyn Handler` として保持できる
#[async_trait]
pub trait Handler: Send + Sync {
    /// Configured minimum level.
    fn level(&self) -> Level;

    fn lifecycle(&self) -> Lifecycle;

    async fn setup(&self) -> Result<(), LogError>;

    fn handle(&self, record: &LogRecord);

    fn destroy(&self);

    fn enabled(&self, level: Level) -> bool {
        is_enabled(level, self.level())
    }
}
