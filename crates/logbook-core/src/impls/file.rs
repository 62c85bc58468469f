//! FileHandler: a writer handler over a file it opens and closes itself.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs::OpenOptions;

use super::sink::Sink;
use crate::domain::{Level, LogError, LogRecord};
use crate::ports::{Handler, HandlerOptions, Lifecycle};
use crate::sync::lock;

/// How the log file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Create if missing, keep existing content.
    #[default]
    Append,
    /// Create if missing, truncate existing content.
    Write,
    /// Fail if the file already exists.
    New,
}

/// File output.
///
/// The file is opened in `setup` and closed in `destroy`; records handled
/// outside that window are dropped. Output is buffered and flushed on
/// destroy, and immediately for ERROR and above.
pub struct FileHandler {
    opts: HandlerOptions,
    path: PathBuf,
    mode: FileMode,
    sink: Mutex<Sink<BufWriter<File>>>,
}

impl FileHandler {
    pub fn new(opts: HandlerOptions, path: impl Into<PathBuf>) -> Self {
        Self {
            opts,
            path: path.into(),
            mode: FileMode::default(),
            sink: Mutex::new(Sink::new(None)),
        }
    }

    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attaches a freshly opened file unless the handler was destroyed after
    /// `epoch` was taken, in which case the file is closed again.
    fn install(&self, epoch: u64, file: File) -> bool {
        let mut sink = lock(&self.sink);
        if sink.epoch() != epoch {
            tracing::debug!(path = %self.path.display(), "handler destroyed during setup");
            return false;
        }
        tracing::debug!(path = %self.path.display(), mode = ?self.mode, "opened log file");
        sink.ready(Some(BufWriter::new(file)));
        true
    }

    async fn open(&self) -> Result<File, LogError> {
        let mut options = OpenOptions::new();
        match self.mode {
            FileMode::Append => {
                options.append(true).create(true);
            }
            FileMode::Write => {
                options.write(true).create(true).truncate(true);
            }
            FileMode::New => {
                options.write(true).create_new(true);
            }
        }
        let file = options.open(&self.path).await?;
        Ok(file.into_std().await)
    }
}

#[async_trait]
impl Handler for FileHandler {
    fn level(&self) -> Level {
        self.opts.level
    }

    fn lifecycle(&self) -> Lifecycle {
        lock(&self.sink).lifecycle()
    }

    async fn setup(&self) -> Result<(), LogError> {
        let epoch = {
            let sink = lock(&self.sink);
            sink.check_setup()?;
            sink.epoch()
        };
        let file = self.open().await?;
        self.install(epoch, file);
        Ok(())
    }

    fn handle(&self, record: &LogRecord) {
        if !self.enabled(record.level()) {
            return;
        }
        let line = self.opts.formatter.format(record);
        lock(&self.sink).write_line(&line, record.level() >= Level::Error);
    }

    fn destroy(&self) {
        lock(&self.sink).close();
    }
}
