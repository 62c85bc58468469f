//! Lifecycle-aware byte sink shared by the writer and file handlers.

use std::io::Write;

use crate::domain::LogError;
use crate::ports::Lifecycle;

pub(crate) struct Sink<W: Write> {
    lifecycle: Lifecycle,
    writer: Option<W>,
    /// Bumped on every effective `close`.
    epoch: u64,
}

impl<W: Write> Sink<W> {
    pub(crate) fn new(writer: Option<W>) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            writer,
            epoch: 0,
        }
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn check_setup(&self) -> Result<(), LogError> {
        self.lifecycle.check_setup()
    }

    /// Marks the sink Ready, swapping in `writer` when one is given.
    pub(crate) fn ready(&mut self, writer: Option<W>) {
        if writer.is_some() {
            self.writer = writer;
        }
        self.lifecycle = Lifecycle::Ready;
    }

    /// Writes one line. Silently does nothing once destroyed or when no
    /// writer is attached; I/O errors are reported and swallowed.
    pub(crate) fn write_line(&mut self, line: &str, flush: bool) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let result = writeln!(writer, "{line}").and_then(|()| {
            if flush { writer.flush() } else { Ok(()) }
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write log record");
        }
    }

    /// Flushes and drops the writer. Idempotent.
    pub(crate) fn close(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.lifecycle = Lifecycle::Destroyed;
        self.epoch += 1;
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            tracing::warn!(error = %e, "failed to flush log sink");
        }
    }
}
