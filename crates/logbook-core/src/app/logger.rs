//! Logger: level filter plus ordered fan-out to handlers.

use std::fmt;
use std::sync::Arc;

use crate::domain::{Level, LogError, LogRecord, is_enabled};
use crate::ports::{Clock, Handler};

/// A named logger.
///
/// The logger does not own its handlers' lifecycle; it holds shared
/// references into the registry's handler table. Dispatch is synchronous:
/// each handler runs to completion, in list order, on the calling thread.
pub struct Logger {
    name: String,
    level: Level,
    handlers: Vec<Arc<dyn Handler>>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    pub fn new(
        name: impl Into<String>,
        level: Level,
        handlers: Vec<Arc<dyn Handler>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            handlers,
            clock,
        }
    }

    /// Like [`Logger::new`] with the level given by name.
    pub fn with_level_name(
        name: impl Into<String>,
        level: &str,
        handlers: Vec<Arc<dyn Handler>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LogError> {
        Ok(Self::new(name, level.parse()?, handlers, clock))
    }

    /// Level NOTSET, no handlers: accepts calls and drops them.
    pub(crate) fn silent(name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::new(name, Level::NotSet, Vec::new(), clock)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn enabled(&self, level: Level) -> bool {
        is_enabled(level, self.level)
    }

    /// Dispatches `msg` at `level` and returns the message, or `None` when
    /// the logger's threshold filtered it out. Filtered calls build no record
    /// and touch no handler.
    pub fn log(&self, level: Level, msg: impl Into<String>) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }
        Some(self.dispatch(level, msg.into(), Vec::new()))
    }

    /// [`Logger::log`] with positional arguments carried on the record.
    pub fn log_args(
        &self,
        level: Level,
        msg: impl Into<String>,
        args: &[&dyn fmt::Display],
    ) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }
        let args = args.iter().map(|a| a.to_string()).collect();
        Some(self.dispatch(level, msg.into(), args))
    }

    pub fn debug(&self, msg: impl Into<String>) -> Option<String> {
        self.log(Level::Debug, msg)
    }

    pub fn info(&self, msg: impl Into<String>) -> Option<String> {
        self.log(Level::Info, msg)
    }

    pub fn warning(&self, msg: impl Into<String>) -> Option<String> {
        self.log(Level::Warning, msg)
    }

    pub fn error(&self, msg: impl Into<String>) -> Option<String> {
        self.log(Level::Error, msg)
    }

    pub fn critical(&self, msg: impl Into<String>) -> Option<String> {
        self.log(Level::Critical, msg)
    }

    pub fn debug_args(&self, msg: impl Into<String>, args: &[&dyn fmt::Display]) -> Option<String> {
        self.log_args(Level::Debug, msg, args)
    }

    pub fn info_args(&self, msg: impl Into<String>, args: &[&dyn fmt::Display]) -> Option<String> {
        self.log_args(Level::Info, msg, args)
    }

    pub fn warning_args(
        &self,
        msg: impl Into<String>,
        args: &[&dyn fmt::Display],
    ) -> Option<String> {
        self.log_args(Level::Warning, msg, args)
    }

    pub fn error_args(&self, msg: impl Into<String>, args: &[&dyn fmt::Display]) -> Option<String> {
        self.log_args(Level::Error, msg, args)
    }

    pub fn critical_args(
        &self,
        msg: impl Into<String>,
        args: &[&dyn fmt::Display],
    ) -> Option<String> {
        self.log_args(Level::Critical, msg, args)
    }

    fn dispatch(&self, level: Level, msg: String, args: Vec<String>) -> String {
        let record = LogRecord::new(level, msg, args, self.name.as_str(), self.clock.now());
        for handler in &self.handlers {
            handler.handle(&record);
        }
        record.into_msg()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use crate::testing::RecordingHandler;
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn below_threshold_touches_no_handler() {
        for threshold in Level::ALL {
            for level in Level::ALL.into_iter().filter(|l| l.rank() < threshold.rank()) {
                let a = RecordingHandler::new(Level::Debug);
                let b = RecordingHandler::new(Level::Debug);
                let logger = Logger::new("svc", threshold, vec![a.clone(), b.clone()], clock());

                assert_eq!(logger.log(level, "dropped"), None);
                assert_eq!(a.calls(), 0);
                assert_eq!(b.calls(), 0);
            }
        }
    }

    #[test]
    fn at_or_above_threshold_reaches_every_handler_once() {
        for threshold in Level::ALL {
            for level in Level::ALL.into_iter().filter(|l| l.rank() >= threshold.rank()) {
                let a = RecordingHandler::new(Level::Debug);
                let b = RecordingHandler::new(Level::Debug);
                let logger = Logger::new("svc", threshold, vec![a.clone(), b.clone()], clock());

                assert_eq!(logger.log(level, "kept"), Some("kept".to_string()));
                for handler in [&a, &b] {
                    assert_eq!(handler.calls(), 1);
                    let handled = handler.handled();
                    assert_eq!(handled.len(), 1);
                    assert_eq!(handled[0].msg(), "kept");
                    assert_eq!(handled[0].level(), level);
                }
            }
        }
    }

    #[test]
    fn records_carry_logger_name_timestamp_and_args() {
        let handler = RecordingHandler::new(Level::Debug);
        let logger = Logger::new("billing", Level::Debug, vec![handler.clone()], clock());

        logger.log_args(Level::Warning, "retrying charge", &[&"card-7", &3]);

        let handled = handler.handled();
        assert_eq!(handled[0].logger_name(), "billing");
        assert_eq!(handled[0].args(), ["card-7".to_string(), "3".to_string()]);
        assert_eq!(
            handled[0].datetime(),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn handler_threshold_applies_after_logger_threshold() {
        let chatty = RecordingHandler::new(Level::Debug);
        let strict = RecordingHandler::new(Level::Error);
        let logger = Logger::new(
            "svc",
            Level::Info,
            vec![chatty.clone(), strict.clone()],
            clock(),
        );

        logger.info("started");
        logger.error("crashed");

        assert_eq!(chatty.handled().len(), 2);
        assert_eq!(strict.calls(), 2);
        assert_eq!(strict.handled().len(), 1);
        assert_eq!(strict.handled()[0].msg(), "crashed");
    }

    #[test]
    fn level_methods_map_to_their_levels() {
        let handler = RecordingHandler::new(Level::Debug);
        let logger = Logger::new("svc", Level::Debug, vec![handler.clone()], clock());

        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");

        let levels: Vec<Level> = handler.handled().iter().map(LogRecord::level).collect();
        assert_eq!(levels, Level::ALL.to_vec());
    }

    #[test]
    fn level_methods_with_args_carry_them_on_the_record() {
        let handler = RecordingHandler::new(Level::Debug);
        let logger = Logger::new("svc", Level::Info, vec![handler.clone()], clock());

        assert_eq!(logger.debug_args("filtered", &[&1]), None);
        logger.info_args("started on", &[&"0.0.0.0", &8080]);
        logger.warning_args("slow query", &[&"users", &1.5]);
        logger.error_args("failed", &[&"io"]);
        logger.critical_args("down", &[]);

        let handled = handler.handled();
        let levels: Vec<Level> = handled.iter().map(LogRecord::level).collect();
        assert_eq!(
            levels,
            [Level::Info, Level::Warning, Level::Error, Level::Critical]
        );
        assert_eq!(handled[0].args(), ["0.0.0.0".to_string(), "8080".to_string()]);
        assert_eq!(handled[1].msg(), "slow query");
        assert_eq!(handled[1].args(), ["users".to_string(), "1.5".to_string()]);
        assert_eq!(handled[2].args(), ["io".to_string()]);
        assert!(handled[3].args().is_empty());
    }

    #[test]
    fn silent_logger_drops_everything() {
        let logger = Logger::silent("unknown", clock());
        for level in Level::ALL {
            assert_eq!(logger.log(level, "nothing"), None);
        }
        assert!(logger.handlers().is_empty());
    }

    #[test]
    fn invalid_level_name_is_rejected() {
        let err = Logger::with_level_name("svc", "VERBOSE", Vec::new(), clock()).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(name) if name == "VERBOSE"));
    }
}
