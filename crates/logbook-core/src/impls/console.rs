//! ConsoleHandler: WARNING and below to stdout, ERROR and above to stderr.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Level, LogError, LogRecord};
use crate::ports::{Handler, HandlerOptions, Lifecycle};
use crate::sync::lock;

/// Console output.
///
/// Works without `setup`: the registry's default handler is never set up.
pub struct ConsoleHandler {
    opts: HandlerOptions,
    lifecycle: Mutex<Lifecycle>,
}

impl ConsoleHandler {
    pub fn new(opts: HandlerOptions) -> Self {
        Self {
            opts,
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    fn write(level: Level, line: &str) {
        let result = if is_stderr(level) {
            writeln!(io::stderr().lock(), "{line}")
        } else {
            writeln!(io::stdout().lock(), "{line}")
        };
        // A closed pipe must not take the caller down.
        if let Err(e) = result {
            tracing::debug!(error = %e, "console write failed");
        }
    }
}

/// ERROR and above go to stderr, everything else to stdout.
fn is_stderr(level: Level) -> bool {
    level >= Level::Error
}

#[async_trait]
impl Handler for ConsoleHandler {
    fn level(&self) -> Level {
        self.opts.level
    }

    fn lifecycle(&self) -> Lifecycle {
        *lock(&self.lifecycle)
    }

    async fn setup(&self) -> Result<(), LogError> {
        let mut lifecycle = lock(&self.lifecycle);
        lifecycle.check_setup()?;
        *lifecycle = Lifecycle::Ready;
        Ok(())
    }

    fn handle(&self, record: &LogRecord) {
        if !self.enabled(record.level()) || self.lifecycle() == Lifecycle::Destroyed {
            return;
        }
        let line = self.opts.formatter.format(record);
        Self::write(record.level(), &line);
    }

    fn destroy(&self) {
        let mut lifecycle = lock(&self.lifecycle);
        if *lifecycle != Lifecycle::Destroyed {
            if let Err(e) = io::stdout().flush() {
                tracing::debug!(error = %e, "console flush failed");
            }
            *lifecycle = Lifecycle::Destroyed;
        }
    }
}
