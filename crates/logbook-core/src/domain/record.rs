//! LogRecord: one log event as handed to handlers.
//!
//! A record is built by the dispatching logger, borrowed by every handler in
//! turn and dropped when fan-out finishes. Nothing retains it.

use chrono::{DateTime, Utc};

use super::level::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    level: Level,
    msg: String,
    args: Vec<String>,
    logger_name: String,
    datetime: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        level: Level,
        msg: impl Into<String>,
        args: Vec<String>,
        logger_name: impl Into<String>,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            args,
            logger_name: logger_name.into(),
            datetime,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn level_name(&self) -> &'static str {
        self.level.name()
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Positional arguments, already rendered to strings.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    pub fn into_msg(self) -> String {
        self.msg
    }
}
