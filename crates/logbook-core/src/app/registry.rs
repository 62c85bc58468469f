//! Registry - the table of configured handlers and loggers.
//!
//! The registry is an ordinary value: build one per test, or use the
//! process-wide instance behind [`crate::global`].
//!
//! # Default logger vs. the `""` entry
//! A registry carries two notions of "the default logger":
//! - [`Registry::default_logger`]: built directly at construction (INFO,
//!   writing to an INFO [`ConsoleHandler`]). `get_logger("")` and the
//!   crate-level `debug/info/...` functions use it. `setup` never replaces it.
//! - the `""` entry of the logger table, produced by applying
//!   [`LogConfig::bootstrap`]. Its handler list names a handler `""` that the
//!   bootstrap config does not declare, so the entry ends up with no handlers.
//!
//! Both are kept as they are; only the first one is reachable through
//! `get_logger`. Use [`Registry::configured_logger`] to inspect the table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::app::config::{DEFAULT_LEVEL, DEFAULT_NAME, LogConfig};
use crate::app::logger::Logger;
use crate::domain::LogError;
use crate::impls::ConsoleHandler;
use crate::ports::{Clock, Handler, HandlerOptions, SystemClock};
use crate::sync::{read, write};

pub struct Registry {
    default_handler: Arc<dyn Handler>,
    default_logger: Arc<Logger>,
    handlers: RwLock<HashMap<String, Arc<dyn Handler>>>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    config: RwLock<LogConfig>,
    clock: Arc<dyn Clock>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Registry whose loggers stamp records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let default_handler: Arc<dyn Handler> =
            Arc::new(ConsoleHandler::new(HandlerOptions::new(DEFAULT_LEVEL)));
        Self::with_default_handler(default_handler, clock)
    }

    /// Registry whose default logger writes to `default_handler` instead of
    /// the console.
    pub fn with_default_handler(default_handler: Arc<dyn Handler>, clock: Arc<dyn Clock>) -> Self {
        let default_logger = Arc::new(Logger::new(
            DEFAULT_NAME,
            DEFAULT_LEVEL,
            vec![default_handler.clone()],
            clock.clone(),
        ));

        let registry = Self {
            default_handler,
            default_logger,
            handlers: RwLock::new(HashMap::new()),
            loggers: RwLock::new(HashMap::new()),
            config: RwLock::new(LogConfig::bootstrap()),
            clock,
        };

        // The bootstrap config declares no handlers, so only the logger half
        // of `setup` has any work to do and it needs no awaiting.
        let bootstrap = LogConfig::bootstrap();
        if let Err(e) = registry.install_loggers(&bootstrap) {
            tracing::error!(error = %e, "bootstrap logger config rejected");
        }
        registry
    }

    /// Replaces the whole configuration.
    ///
    /// 1. records `config` as current
    /// 2. destroys and forgets every registered handler
    /// 3. sets up the new handlers one at a time, in declaration order,
    ///    registering each as soon as it is ready
    /// 4. drops every logger, including auto-created ones
    /// 5. builds the configured loggers; handler names missing from the
    ///    handler table are skipped
    ///
    /// Not transactional: if a handler fails to set up, the error is returned
    /// and the handlers brought up before it stay registered, while the logger
    /// table is left as it was. An invalid logger level fails after the logger
    /// table has been cleared. Loggers handed out earlier keep their handler
    /// references and dispatch into destroyed handlers, which ignore them.
    pub async fn setup(&self, config: LogConfig) -> Result<(), LogError> {
        *write(&self.config) = config.clone();

        let old: Vec<(String, Arc<dyn Handler>)> = write(&self.handlers).drain().collect();
        for (name, handler) in old {
            tracing::debug!(handler = %name, "destroying handler");
            handler.destroy();
        }

        for (name, handler) in config.handlers() {
            if let Err(e) = handler.setup().await {
                tracing::warn!(handler = %name, error = %e, "handler setup failed");
                return Err(LogError::HandlerSetup {
                    name: name.clone(),
                    source: Box::new(e),
                });
            }
            write(&self.handlers).insert(name.clone(), handler.clone());
        }

        self.install_loggers(&config)?;

        tracing::debug!(
            handlers = config.handlers().len(),
            loggers = config.loggers().len(),
            "registry configured"
        );
        Ok(())
    }

    /// Steps 4 and 5 of `setup`.
    ///
    /// The table is cleared first and loggers are inserted as they are built,
    /// so an invalid level stops the pass with the entries declared before it
    /// installed and nothing from the previous config left behind.
    fn install_loggers(&self, config: &LogConfig) -> Result<(), LogError> {
        let handlers = read(&self.handlers);
        let mut loggers = write(&self.loggers);
        loggers.clear();

        for (name, logger) in config.loggers() {
            let level = logger.resolved_level()?;
            let resolved: Vec<Arc<dyn Handler>> = logger
                .handler_names()
                .iter()
                .filter_map(|h| handlers.get(h).cloned())
                .collect();
            loggers.insert(
                name.clone(),
                Arc::new(Logger::new(name.as_str(), level, resolved, self.clock.clone())),
            );
        }
        Ok(())
    }

    /// Looks up a logger by name.
    ///
    /// `""` is the default logger. A name not configured by the last `setup`
    /// gets a silent logger (level NOTSET, no handlers), registered so that
    /// later calls return the same instance until the next `setup`.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name.is_empty() {
            return self.default_logger.clone();
        }

        if let Some(logger) = read(&self.loggers).get(name) {
            return logger.clone();
        }

        write(&self.loggers)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::silent(name, self.clock.clone())))
            .clone()
    }

    /// Logger table entry, without the default-logger shortcut or
    /// auto-creation.
    pub fn configured_logger(&self, name: &str) -> Option<Arc<Logger>> {
        read(&self.loggers).get(name).cloned()
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn Handler>> {
        read(&self.handlers).get(name).cloned()
    }

    pub fn handler_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.handlers).keys().cloned().collect();
        names.sort();
        names
    }

    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.loggers).keys().cloned().collect();
        names.sort();
        names
    }

    /// The config most recently passed to `setup`.
    pub fn config(&self) -> LogConfig {
        read(&self.config).clone()
    }

    pub fn default_logger(&self) -> Arc<Logger> {
        self.default_logger.clone()
    }

    pub fn default_handler(&self) -> Arc<dyn Handler> {
        self.default_handler.clone()
    }

    /// Destroys every registered handler and the default handler.
    ///
    /// Logging keeps working afterwards in the sense that nothing fails; it
    /// just produces no output.
    pub fn shutdown(&self) {
        let handlers: Vec<Arc<dyn Handler>> = write(&self.handlers).drain().map(|(_, h)| h).collect();
        for handler in handlers {
            handler.destroy();
        }
        self.default_handler.destroy();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
