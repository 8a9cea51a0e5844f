//! Core logging implementation with automatic filtering
//!
//! Checks if a log should be displayed based on level and tag, then hands
//! it to the format module.

use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
/// 4. Verbose level requires --verbose
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level == LogLevel::Debug {
        return config.min_level >= LogLevel::Debug || is_debug_enabled_for_tag(tag);
    }

    level <= config.min_level
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{set_logger_config, LoggerConfig};
    use std::collections::HashSet;

    #[test]
    fn test_filtering_rules() {
        let mut debug_tags = HashSet::new();
        debug_tags.insert("chain".to_string());
        set_logger_config(LoggerConfig {
            min_level: LogLevel::Info,
            debug_tags,
        });

        assert!(should_log(&LogTag::Api, LogLevel::Error));
        assert!(should_log(&LogTag::Api, LogLevel::Info));
        assert!(!should_log(&LogTag::Api, LogLevel::Debug));
        assert!(should_log(&LogTag::Chain, LogLevel::Debug));
        assert!(!should_log(&LogTag::Chain, LogLevel::Verbose));
    }
}
