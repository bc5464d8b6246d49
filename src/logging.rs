// logging.rs
// Simple logging utility for the bingo card

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

/// Log level enum
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Error,
    Warning,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
        }
    }
}

/// Where log lines go. The terminal UI owns stdout while a card is shown,
/// so it switches to a file or turns logging off.
#[derive(Debug)]
pub enum LogSink {
    Stdout,
    Stderr,
    File(File),
    Off,
}

static SINK: Mutex<LogSink> = Mutex::new(LogSink::Stdout);

pub fn set_sink(sink: LogSink) {
    if let Ok(mut current) = SINK.lock() {
        *current = sink;
    }
}

/// Appends log lines to `path`, creating parent directories as needed.
pub fn log_to_file<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    set_sink(LogSink::File(file));
    Ok(())
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Format and write a log message with timestamp to the current sink
pub fn log_message(level: LogLevel, message: &str) {
    let Ok(mut sink) = SINK.lock() else {
        return;
    };
    match &mut *sink {
        LogSink::Stdout => println!("{}", format_line(level, message)),
        LogSink::Stderr => eprintln!("{}", format_line(level, message)),
        LogSink::File(file) => {
            // A failed log write has nowhere better to go.
            let _ = writeln!(file, "{}", format_line(level, message));
        }
        LogSink::Off => {}
    }
}

/// Log an info message
pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

/// Log an error message
pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}

/// Log a warning message
pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

/// Format and print an error log message to stderr with timestamp, whatever the sink
pub fn log_error_stderr(message: &str) {
    eprintln!("{}", format_line(LogLevel::Error, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(LogLevel::Warning, "card locked");
        let parts: Vec<&str> = line.splitn(3, " - ").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), "2025-01-01 00:00:00".len());
        assert_eq!(parts[1], "WARNING");
        assert_eq!(parts[2], "card locked");
    }
}
