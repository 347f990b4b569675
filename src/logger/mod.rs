//! Structured console logging with tags and levels
//!
//! Provides a small, ergonomic logging API:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Subsystem tags for filtering and scanning output
//! - Colored, aligned console output
//!
//! ## Usage
//!
//! ```rust
//! use leadbook::logger::{self, LogTag};
//!
//! logger::info(LogTag::Api, "fetched 12 leads");
//! logger::warning(LogTag::Import, "server reported 2 rejected rows");
//! logger::debug(LogTag::Filters, "query params: status=New"); // only with --debug
//! ```
//!
//! Call [`init`] once at startup with the minimum level to display; before
//! `init` the default threshold (Info) applies.

mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

use once_cell::sync::Lazy;
use std::sync::RwLock;

struct LoggerConfig {
    min_level: LogLevel,
}

static CONFIG: Lazy<RwLock<LoggerConfig>> = Lazy::new(|| {
    RwLock::new(LoggerConfig {
        min_level: LogLevel::Info,
    })
});

/// Set the minimum level to display. Errors are always shown.
pub fn init(min_level: LogLevel) {
    if let Ok(mut config) = CONFIG.write() {
        config.min_level = min_level;
    }
}

fn should_log(level: LogLevel) -> bool {
    // Errors always log
    if level == LogLevel::Error {
        return true;
    }
    match CONFIG.read() {
        Ok(config) => level <= config.min_level,
        Err(_) => true,
    }
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(level) {
        return;
    }
    format::format_and_log(tag, level, message);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (shown only when the threshold is raised to Debug)
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(LogLevel::from_str("warn"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("nope"), None);
    }
}
