//! Structured logging for the monitoring service.
//!
//! Context-rich logging with a source tag and an optional location
//! identifier, to console and optionally to a file. Failures from the
//! source client are classified so transient conditions (no network, data
//! missing for a location) log quieter than genuine service degradation.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::{FetchError, Selection};

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The statistics site client.
    Web,
    /// The refresh scheduler.
    Sched,
    /// Session configuration load/save.
    Config,
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Web => write!(f, "WEB"),
            Source::Sched => write!(f, "SCHED"),
            Source::Config => write!(f, "CFG"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance. Logging before `init_logger` is a silent no-op.
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    min_level: LogLevel,
    log_file: Option<String>,
}

impl Logger {
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger { min_level, log_file };
        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: Source, location: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let location_part = location.map(|l| format!(" [{}]", l)).unwrap_or_default();
        let entry = format!("{} {} {}{}: {}", timestamp, level, source, location_part, message);

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public logging functions
// ---------------------------------------------------------------------------

/// Initialize the global logger.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

pub fn info(source: Source, location: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, location, message);
    }
}

pub fn warn(source: Source, location: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, location, message);
    }
}

pub fn error(source: Source, location: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, location, message);
    }
}

pub fn debug(source: Source, location: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, location, message);
    }
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

/// Severity of a fetch failure for logging purposes.
///
/// Connectivity loss and per-location data gaps happen in normal operation;
/// transport and parse failures point at the endpoint or at our layout
/// assumptions going stale.
pub fn classify_fetch_failure(err: &FetchError) -> LogLevel {
    match err {
        FetchError::NoConnectivity => LogLevel::Warning,
        FetchError::DataUnavailable { .. } => LogLevel::Warning,
        FetchError::Transport(_) => LogLevel::Error,
        FetchError::Parse(_) => LogLevel::Error,
    }
}

/// Log a fetch failure for a selection at its classified severity.
pub fn log_fetch_failure(selection: &Selection, err: &FetchError) {
    let location = selection.to_string();
    let message = format!("fetch failed: {}", err);
    match classify_fetch_failure(err) {
        LogLevel::Error => error(Source::Web, Some(location.as_str()), &message),
        LogLevel::Warning => warn(Source::Web, Some(location.as_str()), &message),
        _ => info(Source::Web, Some(location.as_str()), &message),
    }
}
