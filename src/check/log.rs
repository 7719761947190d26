//! Per-check log sink.
//!
//! Every executed check gets its own `step.log`. The sink is handed to the
//! check through its [`CheckContext`](super::CheckContext); nothing is attached
//! to or detached from a shared logger. Each entry is also forwarded to
//! `tracing` so it shows up in the process diagnostics at the matching level.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Append-only log for a single check.
#[derive(Clone)]
pub struct StepLog {
    check: Arc<str>,
    sink: Sink,
}

impl StepLog {
    /// Create (or truncate) the log file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path, check: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(check, BufWriter::new(file)))
    }

    /// Log into an arbitrary writer.
    pub fn from_writer(check: &str, writer: impl Write + Send + 'static) -> Self {
        Self {
            check: Arc::from(check),
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A log that drops everything written to it.
    #[must_use]
    pub fn discard(check: &str) -> Self {
        Self::from_writer(check, io::sink())
    }

    #[must_use]
    pub fn check_name(&self) -> &str {
        &self.check
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.record(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.record(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.record(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.record(LogLevel::Error, message);
    }

    /// Write one entry. Logging never fails the check; write errors are dropped.
    pub fn record(&self, level: LogLevel, message: impl fmt::Display) {
        let message = message.to_string();
        let check = &*self.check;
        match level {
            LogLevel::Debug => tracing::debug!(check, "{message}"),
            LogLevel::Info => tracing::info!(check, "{message}"),
            LogLevel::Warning => tracing::warn!(check, "{message}"),
            LogLevel::Error => tracing::error!(check, "{message}"),
        }

        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{:<8}{message}", level.as_str());
        }
    }

    /// Flush buffered entries to the underlying writer.
    pub fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for StepLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepLog")
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}
