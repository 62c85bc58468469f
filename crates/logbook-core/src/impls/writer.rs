//! WriterHandler: formats records onto any `Write` sink.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use super::sink::Sink;
use crate::domain::{Level, LogError, LogRecord};
use crate::ports::{Handler, HandlerOptions, Lifecycle};
use crate::sync::lock;

/// Handler over an arbitrary byte sink (socket, pipe, in-memory buffer, ...).
///
/// The sink is usable as soon as the handler is built; `setup` only moves
/// the lifecycle to Ready. `destroy` flushes and drops the sink, so a
/// destroyed writer handler stays silent even if set up again.
pub struct WriterHandler {
    opts: HandlerOptions,
    sink: Mutex<Sink<Box<dyn Write + Send>>>,
}

impl WriterHandler {
    pub fn new(opts: HandlerOptions, writer: impl Write + Send + 'static) -> Self {
        Self {
            opts,
            sink: Mutex::new(Sink::new(Some(Box::new(writer)))),
        }
    }
}

#[async_trait]
impl Handler for WriterHandler {
    fn level(&self) -> Level {
        self.opts.level
    }

    fn lifecycle(&self) -> Lifecycle {
        lock(&self.sink).lifecycle()
    }

    async fn setup(&self) -> Result<(), LogError> {
        let mut sink = lock(&self.sink);
        sink.check_setup()?;
        sink.ready(None);
        Ok(())
    }

    fn handle(&self, record: &LogRecord) {
        if !self.enabled(record.level()) {
            return;
        }
        let line = self.opts.formatter.format(record);
        lock(&self.sink).write_line(&line, false);
    }

    fn destroy(&self) {
        lock(&self.sink).close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SharedBuf, record};

    #[tokio::test]
    async fn writes_records_at_or_above_its_level() {
        let buf = SharedBuf::default();
        let handler = WriterHandler::new(HandlerOptions::new(Level::Warning), buf.clone());
        handler.setup().await.unwrap();

        handler.handle(&record(Level::Info, "quiet"));
        handler.handle(&record(Level::Warning, "heads up"));
        handler.handle(&record(Level::Critical, "on fire"));

        assert_eq!(buf.contents(), "WARNING heads up\nCRITICAL on fire\n");
    }

    #[tokio::test]
    async fn second_setup_is_rejected() {
        let handler = WriterHandler::new(HandlerOptions::new(Level::Info), SharedBuf::default());
        handler.setup().await.unwrap();
        assert!(matches!(handler.setup().await, Err(LogError::AlreadySetUp)));
    }

    #[test]
    fn handle_and_destroy_after_destroy_are_silent() {
        let buf = SharedBuf::default();
        let handler = WriterHandler::new(HandlerOptions::new(Level::Debug), buf.clone());

        handler.destroy();
        handler.handle(&record(Level::Critical, "too late"));
        handler.destroy();

        assert_eq!(handler.lifecycle(), Lifecycle::Destroyed);
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn uses_the_configured_formatter() {
        let buf = SharedBuf::default();
        let opts = HandlerOptions::new(Level::Debug)
            .with_formatter(crate::domain::Formatter::template("[{loggerName}] {msg}"));
        let handler = WriterHandler::new(opts, buf.clone());

        handler.handle(&record(Level::Debug, "hello"));

        assert_eq!(buf.contents(), "[test] hello\n");
    }
}
