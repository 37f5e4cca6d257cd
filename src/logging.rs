//! Diagnostic logging setup
//!
//! Installs the tracing subscriber that both the crate's own diagnostics and the
//! [`TracingHost`](crate::host::TracingHost) print through.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ConsoleConfig;

/// A writer that appends to a shared log file
struct FileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(buf);
            let _ = file.flush();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.flush()
        } else {
            Ok(())
        }
    }
}

/// Writer factory for tracing-subscriber
struct FileWriterMaker {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for FileWriterMaker {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Guard that keeps the logging system alive
pub struct LoggingGuard {
    _file: Option<Arc<Mutex<File>>>,
}

/// Open (or create) a log file for appending
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Pick the filter directive: a non-empty RUST_LOG wins, then the configured directive
fn filter_directive(rust_log: Option<String>, config: &ConsoleConfig) -> String {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| config.log_filter.clone())
}

fn env_filter(config: &ConsoleConfig) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::new(filter_directive(rust_log, config))
}

/// Initialize the global tracing subscriber
///
/// Writes to stderr, or appends to `config.log_file` when set. The returned guard must be kept
/// alive for the duration of logging.
pub fn init_logging(config: &ConsoleConfig) -> Result<LoggingGuard> {
    let filter = env_filter(config);

    match &config.log_file {
        Some(path) => {
            let file = Arc::new(Mutex::new(open_log_file(path)?));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(FileWriterMaker {
                    file: Arc::clone(&file),
                })
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(LoggingGuard { _file: Some(file) })
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(LoggingGuard { _file: None })
        }
    }
}
