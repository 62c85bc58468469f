//! Errors surfaced by level parsing, handler lifecycle and registry setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    #[error("handler {name:?} failed to set up: {source}")]
    HandlerSetup {
        name: String,
        #[source]
        source: Box<LogError>,
    },

    #[error("handler is already set up")]
    AlreadySetUp,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed logger config: {0}")]
    Config(#[from] serde_json::Error),
}
