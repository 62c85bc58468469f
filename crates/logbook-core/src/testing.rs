//! Test doubles shared by the unit tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::{Level, LogError, LogRecord, is_enabled};
use crate::ports::{Handler, Lifecycle};

pub(crate) fn record(level: Level, msg: &str) -> LogRecord {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    LogRecord::new(level, msg, Vec::new(), "test", at)
}

/// In-memory `Write` whose contents stay readable after being moved into a handler.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handler that remembers every record it accepted and every lifecycle call.
pub(crate) struct RecordingHandler {
    level: Level,
    fail_setup: bool,
    state: Mutex<RecordingState>,
}

#[derive(Default)]
struct RecordingState {
    lifecycle: Lifecycle,
    calls: usize,
    handled: Vec<LogRecord>,
    setups: usize,
    destroys: usize,
}

impl RecordingHandler {
    pub(crate) fn new(level: Level) -> Arc<Self> {
        Arc::new(Self {
            level,
            fail_setup: false,
            state: Mutex::default(),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            level: Level::Debug,
            fail_setup: true,
            state: Mutex::default(),
        })
    }

    /// Number of `handle` calls, filtered or not.
    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub(crate) fn handled(&self) -> Vec<LogRecord> {
        self.state.lock().unwrap().handled.clone()
    }

    pub(crate) fn setups(&self) -> usize {
        self.state.lock().unwrap().setups
    }

    pub(crate) fn destroys(&self) -> usize {
        self.state.lock().unwrap().destroys
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state.lock().unwrap().lifecycle
    }

    async fn setup(&self) -> Result<(), LogError> {
        if self.fail_setup {
            return Err(LogError::Io(io::Error::other("sink unavailable")));
        }
        let mut state = self.state.lock().unwrap();
        state.lifecycle.check_setup()?;
        state.lifecycle = Lifecycle::Ready;
        state.setups += 1;
        Ok(())
    }

    fn handle(&self, record: &LogRecord) {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.lifecycle == Lifecycle::Destroyed || !is_enabled(record.level(), self.level) {
            return;
        }
        state.handled.push(record.clone());
    }

    fn destroy(&self) {
        let mut state = self.state.lock().unwrap();
        state.lifecycle = Lifecycle::Destroyed;
        state.destroys += 1;
    }
}
