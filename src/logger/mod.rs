//! Structured logging system for YieldWatch
//!
//! This module provides a small, ergonomic logging API with:
//! - Automatic debug mode filtering from command-line arguments
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yieldwatch::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Pools, "Pool not found in index");
//! logger::info(LogTag::Telegram, "Command handled");
//! logger::debug(LogTag::Chain, "eth_call details: ..."); // Only if --debug-chain
//! logger::verbose(LogTag::Api, "Raw response: ...");   // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup (in main.rs), after the directories exist:
//! ```rust,ignore
//! logger::init();
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// 1. Parse command-line arguments for debug flags
/// 2. Initialize file logging in the logs directory
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<module> flag is provided.
///
/// # Example
/// ```rust,ignore
/// // Only shown with --debug-api flag
/// logger::debug(LogTag::Api, "Request url: ...");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
