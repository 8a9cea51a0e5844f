//! Centralized path resolution for YieldWatch
//!
//! ## Path Strategy
//!
//! The base directory is resolved once, in this order:
//! 1. `--data-dir <path>` command-line flag
//! 2. `YIELDWATCH_HOME` environment variable
//! 3. Platform data directory (`dirs`) + `YieldWatch`
//!
//! ## Directory Structure
//!
//! ```text
//! <base>/
//! ├── data/
//! │ ├── config.toml
//! │ └── pools_config.json
//! └── logs/
//!   └── yieldwatch_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "YieldWatch";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = crate::arguments::get_data_dir_override() {
        return PathBuf::from(dir);
    }

    if let Ok(dir) = std::env::var("YIELDWATCH_HOME") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

/// Returns the base directory for all YieldWatch data
pub fn get_base_directory() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Returns the data directory path (config and pool descriptors)
pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Returns the configuration file path, honoring `--config`
pub fn get_config_path() -> PathBuf {
    crate::arguments::get_config_path_override()
        .map(PathBuf::from)
        .unwrap_or_else(|| get_data_directory().join("config.toml"))
}

/// Returns the pool descriptor file path
///
/// Priority: `--pools` flag, then `pools.config_path` from config, then the
/// default location in the data directory.
pub fn get_pools_config_path(configured: &str) -> PathBuf {
    if let Some(path) = crate::arguments::get_pools_path_override() {
        return PathBuf::from(path);
    }
    if !configured.trim().is_empty() {
        return PathBuf::from(configured);
    }
    get_data_directory().join("pools_config.json")
}

/// Create every directory the bot writes to
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_directory(), get_logs_directory()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}
