//! Logger configuration derived from command-line flags
//!
//! Flags:
//! - `--debug-<tag>` enables DEBUG output for one tag
//! - `--debug-all` enables DEBUG output for every tag
//! - `--verbose` enables everything
//! - `--quiet` shows errors and warnings only

use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that is printed (Error = quietest)
    pub min_level: LogLevel,
    /// Tags with DEBUG output enabled
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(cfg) => cfg.clone(),
        Err(_) => LoggerConfig::default(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut cfg) = LOGGER_CONFIG.write() {
        *cfg = config;
    }
}

/// Build the configuration from a list of arguments
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    if args.iter().any(|a| a == "--quiet") {
        config.min_level = LogLevel::Warning;
    }
    if args.iter().any(|a| a == "--verbose") {
        config.min_level = LogLevel::Verbose;
    }

    for arg in args {
        if arg == "--debug-all" {
            for tag in LogTag::all() {
                config.debug_tags.insert(tag.to_debug_key());
            }
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_lowercase());
        }
    }

    config
}

/// Initialize the configuration from the process arguments
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    set_logger_config(config_from_args(&args));
}

/// Check whether DEBUG output is enabled for a tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config()
        .debug_tags
        .contains(&tag.to_debug_key())
}
