//! Console Logger
//!
//! A `log` backend for browser applications.
//! Records go to the devtools console (stderr when not running on wasm) and the
//! most recent ones are kept in a circular buffer, read back with [`recent`]
//! (the catalog shows the latest errors under its failure banner).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Number of records kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// Render as a single console line
    pub fn line(&self) -> String {
        format!("[{}] {:<5} [{}] {}", self.timestamp, self.level, self.target, self.message)
    }
}

/// Fixed-capacity buffer, oldest entries are evicted first
#[derive(Debug)]
pub struct RingBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest-first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Logger writing to the console and into a ring buffer
pub struct ConsoleLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Snapshot of buffered records at or above `min_level` (all when None)
    pub fn recent(&self, min_level: Option<Level>) -> Vec<LogEntry> {
        let Ok(buffer) = self.buffer.lock() else {
            return Vec::new();
        };
        buffer
            .entries()
            .into_iter()
            .filter(|entry| min_level.map_or(true, |min| entry.level <= min))
            .collect()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };

        emit(&entry);

        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(entry);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(entry: &LogEntry) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(&entry.line());
    match entry.level {
        Level::Error => console::error_1(&line),
        Level::Warn => console::warn_1(&line),
        Level::Info => console::info_1(&line),
        Level::Debug | Level::Trace => console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(entry: &LogEntry) {
    eprintln!("{}", entry.line());
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Buffered records of the global logger
pub fn recent(min_level: Option<Level>) -> Vec<LogEntry> {
    LOGGER
        .get()
        .map(|logger| logger.recent(min_level))
        .unwrap_or_default()
}
