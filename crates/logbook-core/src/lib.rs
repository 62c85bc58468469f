//! logbook-core
//!
//! Leveled logging with pluggable handlers.
//!
//! # Modules
//! - **domain**: levels, records, formatting, errors
//! - **ports**: the `Handler` and `Clock` traits
//! - **impls**: console, writer and file handlers
//! - **app**: `Logger`, `LogConfig` and the `Registry`
//!
//! # Usage
//! ```ignore
//! let registry = Registry::new();
//! registry
//!     .setup(
//!         LogConfig::new()
//!             .handler("file", Arc::new(FileHandler::new(HandlerOptions::new(Level::Debug), "app.log")))
//!             .logger("db", LoggerConfig::new().level("DEBUG").handlers(["file"])),
//!     )
//!     .await?;
//! registry.get_logger("db").debug("connected");
//! ```
//!
//! The crate-level [`debug`], [`info`], [`warning`], [`error`] and
//! [`critical`] functions write through the default logger of a lazily built
//! process-wide registry ([`global`]). They work whether or not that registry
//! has ever been set up.

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

mod sync;

#[cfg(test)]
mod testing;

use std::fmt::Display;
use std::sync::{Arc, OnceLock};

pub use app::{LogConfig, Logger, LoggerConfig, Registry};
pub use domain::{Formatter, Level, LogError, LogRecord, is_enabled};
pub use impls::{ConsoleHandler, FileHandler, FileMode, WriterHandler};
pub use ports::{Clock, FixedClock, Handler, HandlerOptions, Lifecycle, SystemClock};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

/// `global().get_logger(name)`.
pub fn get_logger(name: &str) -> Arc<Logger> {
    global().get_logger(name)
}

/// `global().setup(config)`.
pub async fn setup(config: LogConfig) -> Result<(), LogError> {
    global().setup(config).await
}

pub fn debug(msg: impl Into<String>) -> Option<String> {
    global().default_logger().debug(msg)
}

pub fn info(msg: impl Into<String>) -> Option<String> {
    global().default_logger().info(msg)
}

pub fn warning(msg: impl Into<String>) -> Option<String> {
    global().default_logger().warning(msg)
}

pub fn error(msg: impl Into<String>) -> Option<String> {
    global().default_logger().error(msg)
}

pub fn critical(msg: impl Into<String>) -> Option<String> {
    global().default_logger().critical(msg)
}

pub fn debug_args(msg: impl Into<String>, args: &[&dyn Display]) -> Option<String> {
    global().default_logger().debug_args(msg, args)
}

pub fn info_args(msg: impl Into<String>, args: &[&dyn Display]) -> Option<String> {
    global().default_logger().info_args(msg, args)
}

pub fn warning_args(msg: impl Into<String>, args: &[&dyn Display]) -> Option<String> {
    global().default_logger().warning_args(msg, args)
}

pub fn error_args(msg: impl Into<String>, args: &[&dyn Display]) -> Option<String> {
    global().default_logger().error_args(msg, args)
}

pub fn critical_args(msg: impl Into<String>, args: &[&dyn Display]) -> Option<String> {
    global().default_logger().critical_args(msg, args)
}
