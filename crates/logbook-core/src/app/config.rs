//! LogConfig - `Registry::setup` に渡す設定
//!
//! Handler は sink を所有する実体なのでコードで登録します。
//! Logger のエントリは単なるデータなので JSON からも読み込めます。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Level, LogError};
use crate::ports::Handler;

pub const DEFAULT_LEVEL: Level = Level::Info;
pub const DEFAULT_NAME: &str = "";

/// One logger entry.
///
/// ```json
/// { "level": "WARNING", "handlers": ["console", "audit"] }
/// ```
///
/// Omitted `level` means INFO, omitted `handlers` means none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handlers: Option<Vec<String>>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn handlers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handlers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Declared level, INFO when omitted.
    pub fn resolved_level(&self) -> Result<Level, LogError> {
        match &self.level {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_LEVEL),
        }
    }

    pub fn handler_names(&self) -> &[String] {
        self.handlers.as_deref().unwrap_or_default()
    }
}

/// LogConfig は registry 全体の設定
///
/// # 順序
/// - エントリは宣言順を保持し、`setup` はその順で handler を立ち上げる
/// - 既存の名前を再登録するとその位置で置き換える
#[derive(Clone, Default)]
pub struct LogConfig {
    handlers: Vec<(String, Arc<dyn Handler>)>,
    loggers: Vec<(String, LoggerConfig)>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration applied when a registry is created: no handlers and
    /// an INFO logger under `""` pointing at a handler named `""` that does
    /// not exist, so the resulting table entry has no handlers.
    pub fn bootstrap() -> Self {
        Self::new().logger(
            DEFAULT_NAME,
            LoggerConfig::new()
                .level(DEFAULT_LEVEL.name())
                .handlers([DEFAULT_NAME]),
        )
    }

    pub fn handler(mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        upsert(&mut self.handlers, name.into(), handler);
        self
    }

    pub fn logger(mut self, name: impl Into<String>, logger: LoggerConfig) -> Self {
        upsert(&mut self.loggers, name.into(), logger);
        self
    }

    /// Adds the logger entries of a JSON object keyed by logger name.
    pub fn with_loggers_json(mut self, json: &str) -> Result<Self, LogError> {
        let entries: BTreeMap<String, LoggerConfig> = serde_json::from_str(json)?;
        for (name, logger) in entries {
            upsert(&mut self.loggers, name, logger);
        }
        Ok(self)
    }

    pub fn handlers(&self) -> &[(String, Arc<dyn Handler>)] {
        &self.handlers
    }

    pub fn loggers(&self) -> &[(String, LoggerConfig)] {
        &self.loggers
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, name: String, value: T) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<&str> = self.handlers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("LogConfig")
            .field("handlers", &handlers)
            .field("loggers", &self.loggers)
            .finish()
    }
}
