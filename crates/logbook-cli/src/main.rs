use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use logbook_core::{
    ConsoleHandler, FileHandler, Formatter, Handler, HandlerOptions, Level, Lifecycle, LogConfig,
    LogError, LogRecord, Registry,
};
use tracing_subscriber::EnvFilter;

/// Counts ERROR and above instead of printing them.
struct AlertCounter {
    seen: AtomicU32,
    lifecycle: std::sync::Mutex<Lifecycle>,
}

impl AlertCounter {
    fn new() -> Self {
        Self {
            seen: AtomicU32::new(0),
            lifecycle: std::sync::Mutex::new(Lifecycle::Uninitialized),
        }
    }

    fn seen(&self) -> u32 {
        self.seen.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Handler for AlertCounter {
    fn level(&self) -> Level {
        Level::Error
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.lock().map(|l| *l).unwrap_or(Lifecycle::Destroyed)
    }

    async fn setup(&self) -> Result<(), LogError> {
        if let Ok(mut l) = self.lifecycle.lock() {
            l.check_setup()?;
            *l = Lifecycle::Ready;
        }
        Ok(())
    }

    fn handle(&self, record: &LogRecord) {
        if self.enabled(record.level()) && self.lifecycle() == Lifecycle::Ready {
            self.seen.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn destroy(&self) {
        if let Ok(mut l) = self.lifecycle.lock() {
            *l = Lifecycle::Destroyed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=logbook_core=debug shows registry reconfiguration
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // (A) crate-level functions work before any setup
    logbook_core::info("starting demo");
    logbook_core::debug("filtered by the default INFO threshold");

    // (B) handlers
    let log_path = std::env::temp_dir().join("logbook-demo.log");
    let console = Arc::new(ConsoleHandler::new(
        HandlerOptions::new(Level::Debug)
            .with_formatter(Formatter::template("{datetime} {levelName} [{loggerName}] {msg}")),
    ));
    let file = Arc::new(FileHandler::new(HandlerOptions::named("INFO")?, &log_path));
    let alerts = Arc::new(AlertCounter::new());

    // (C) loggers, declared as data
    let loggers = serde_json::json!({
        "db": { "level": "DEBUG", "handlers": ["console", "file"] },
        "http": { "level": "WARNING", "handlers": ["console", "alerts", "pager"] },
    });

    let registry = Registry::new();
    registry
        .setup(
            LogConfig::new()
                .handler("console", console)
                .handler("file", file)
                .handler("alerts", alerts.clone())
                .with_loggers_json(&loggers.to_string())?,
        )
        .await?;

    // (D) log
    let db = registry.get_logger("db");
    db.debug("pool ready");
    db.log_args(Level::Info, "query took ms", &[&"users", &12]);

    let http = registry.get_logger("http");
    http.info("dropped: below WARNING");
    http.warning("slow upstream");
    http.error("upstream returned 502");

    // unknown loggers are silent until configured
    registry.get_logger("metrics").critical("nobody hears this");

    println!(
        "alerts={} handlers={:?} loggers={:?} file={}",
        alerts.seen(),
        registry.handler_names(),
        registry.logger_names(),
        log_path.display()
    );

    // (E) release files
    registry.shutdown();
    Ok(())
}
