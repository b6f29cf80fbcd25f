//! Console logging.
//!
//! All harness output goes through the [`Logger`] trait so the phases can
//! be tested without capturing the process streams. Text mode logs to
//! stdout; JSON mode logs to stderr and keeps stdout for the summary.

use std::io::{self, Write};
use std::sync::{Arc, RwLock};

/// Verbosity level for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Banners, per-file status and the final summary.
    Normal,
    /// Painter invocations, exit codes, diff offsets (-v).
    Verbose,
    /// Captured painter output sizes (-vv).
    Debug,
}

impl Verbosity {
    /// Create verbosity from CLI flag count.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Trait for logging output.
pub trait Logger: Send + Sync {
    /// Log a message at the given verbosity level.
    fn log(&self, level: Verbosity, message: &str);

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }

    /// Start a normal-level line that the next message completes. Loggers
    /// that cannot hold a partial line emit it whole.
    fn info_start(&self, message: &str) {
        self.info(message);
    }
}

/// Process stream a [`ConsoleLogger`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Logger writing one line per message to stdout or stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: Verbosity,
    stream: Stream,
}

impl ConsoleLogger {
    pub fn new(level: Verbosity, stream: Stream) -> Self {
        Self { level, stream }
    }

    pub fn stdout(level: Verbosity) -> Self {
        Self::new(level, Stream::Stdout)
    }

    pub fn stderr(level: Verbosity) -> Self {
        Self::new(level, Stream::Stderr)
    }

}

impl ConsoleLogger {
    fn write(&self, message: &str, end: &str) {
        // Flush every write so progress shows up while the painter runs.
        match self.stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                let _ = write!(out, "{message}{end}");
                let _ = out.flush();
            }
            Stream::Stderr => {
                let _ = write!(io::stderr().lock(), "{message}{end}");
            }
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            self.write(message, "\n");
        }
    }

    fn info_start(&self, message: &str) {
        self.write(message, "");
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Logger capturing every message, whatever its level.
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
    pending: Arc<RwLock<String>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Messages at or below `level`, i.e. what a console at that level shows.
    pub fn visible_at(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level <= level)
            .map(|e| e.message)
            .collect()
    }

    /// Messages a default console would show.
    pub fn lines(&self) -> Vec<String> {
        self.visible_at(Verbosity::Normal)
    }

    /// Started line not yet completed by a message.
    pub fn pending(&self) -> String {
        self.pending.read().unwrap().clone()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|e| e.message.contains(substring))
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        let start = std::mem::take(&mut *self.pending.write().unwrap());
        self.entries.write().unwrap().push(LogEntry {
            level,
            message: start + message,
        });
    }

    fn info_start(&self, message: &str) {
        self.pending.write().unwrap().push_str(message);
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}
