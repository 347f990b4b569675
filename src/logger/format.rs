//! Log formatting and console output with ANSI colors
//!
//! Handles colorized output with aligned tag and level columns. Output goes to
//! stdout only; broken pipes (piped commands) must not panic the process.

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Column widths for alignment
const TAG_WIDTH: usize = 9;
const LEVEL_WIDTH: usize = 7;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    // Pad before coloring: ANSI escapes would otherwise count toward the
    // column width and break alignment.
    let tag_padded = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    let level_padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);

    let line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        color_tag(tag, &tag_padded),
        color_level(level, &level_padded),
        message,
    );

    // A reader closing the pipe (e.g. `leadbook leads | head`) is not an error
    // worth dying for.
    let mut out = stdout();
    if let Err(err) = writeln!(out, "{}", line) {
        if err.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
}

fn color_tag(tag: LogTag, text: &str) -> ColoredString {
    match tag {
        LogTag::Api => text.cyan(),
        LogTag::Auth => text.magenta(),
        LogTag::Filters => text.blue(),
        LogTag::Import => text.yellow(),
        LogTag::Session => text.green(),
        LogTag::Dashboard => text.bright_blue(),
        LogTag::Config => text.white(),
    }
}

fn color_level(level: LogLevel, text: &str) -> ColoredString {
    match level {
        LogLevel::Error => text.red().bold(),
        LogLevel::Warning => text.yellow(),
        LogLevel::Info => text.normal(),
        LogLevel::Debug => text.dimmed(),
    }
}
