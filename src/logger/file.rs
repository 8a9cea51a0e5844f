//! File persistence for log lines
//!
//! One file per day in the logs directory: `yieldwatch_YYYY-MM-DD.log`.
//! File logging is best-effort; failures fall back to console only.

use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

struct FileLogger {
    date: String,
    writer: BufWriter<File>,
}

static FILE_LOGGER: Lazy<Mutex<Option<FileLogger>>> = Lazy::new(|| Mutex::new(None));

fn log_file_path(date: &str) -> PathBuf {
    crate::paths::get_logs_directory().join(format!("yieldwatch_{}.log", date))
}

fn open_for_date(date: &str) -> Option<FileLogger> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(date))
        .ok()?;

    Some(FileLogger {
        date: date.to_string(),
        writer: BufWriter::new(file),
    })
}

/// Open today's log file
pub fn init_file_logging() {
    let today = Local::now().format("%Y-%m-%d").to_string();
    match open_for_date(&today) {
        Some(logger) => {
            if let Ok(mut guard) = FILE_LOGGER.lock() {
                *guard = Some(logger);
            }
        }
        None => {
            eprintln!(
                "⚠️  Failed to open log file {}, logging to console only",
                log_file_path(&today).display()
            );
        }
    }
}

/// Append a plain line, rotating to a new file when the day changes
pub fn write_to_file(line: &str) {
    let Ok(mut guard) = FILE_LOGGER.lock() else {
        return;
    };
    let Some(current) = guard.as_mut() else {
        return;
    };

    let today = Local::now().format("%Y-%m-%d").to_string();
    if current.date != today {
        let _ = current.writer.flush();
        match open_for_date(&today) {
            Some(next) => *current = next,
            None => return,
        }
    }

    let _ = writeln!(current.writer, "{}", line);
}

/// Flush buffered lines to disk
pub fn flush_file_logging() {
    if let Ok(mut guard) = FILE_LOGGER.lock() {
        if let Some(current) = guard.as_mut() {
            let _ = current.writer.flush();
        }
    }
}
