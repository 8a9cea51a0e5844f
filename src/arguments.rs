//! Centralized argument handling for YieldWatch
//!
//! Features:
//! - Centralized CMD_ARGS storage with thread-safe access
//! - Path override flags (--config, --pools, --data-dir)
//! - Mode flags (--help, --check)

use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    arg_value_in(&get_cmd_args(), flag)
}

fn arg_value_in(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

// =============================================================================
// MODE FLAGS
// =============================================================================

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Load configuration and pools, print a summary, and exit
pub fn is_check_enabled() -> bool {
    has_arg("--check")
}

// =============================================================================
// PATH OVERRIDES
// =============================================================================

pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

pub fn get_pools_path_override() -> Option<String> {
    get_arg_value("--pools")
}

pub fn get_data_dir_override() -> Option<String> {
    get_arg_value("--data-dir")
}

/// Print usage information
pub fn print_help() {
    println!("YieldWatch - crypto prices and pool yields in Telegram");
    println!();
    println!("USAGE:");
    println!("    yieldwatch [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help            Print this help");
    println!("    --check               Validate config and pools, then exit");
    println!("    --config <PATH>       Config file (default: <data dir>/data/config.toml)");
    println!("    --pools <PATH>        Pool descriptors JSON (default: <data dir>/data/pools_config.json)");
    println!("    --data-dir <PATH>     Base directory (default: $YIELDWATCH_HOME or platform data dir)");
    println!("    --quiet               Only show warnings and errors");
    println!("    --verbose             Show all log output");
    println!("    --debug-<module>      Debug output for one module");
    println!("                          (system, config, telegram, api, prices, pools, chain, all)");
    println!();
    println!("ENVIRONMENT:");
    println!("    TELEGRAM_BOT_TOKEN    Overrides telegram.bot_token");
    println!("    ETH_RPC_URL           Overrides chain.rpc_url");
    println!("    COINGECKO_API_KEY     Overrides prices.api_key");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_value_lookup() {
        let list = args(&["yieldwatch", "--config", "/tmp/c.toml", "--pools"]);
        assert_eq!(arg_value_in(&list, "--config"), Some("/tmp/c.toml".to_string()));
        assert_eq!(arg_value_in(&list, "--pools"), None);
        assert_eq!(arg_value_in(&list, "--data-dir"), None);
    }

    #[test]
    fn test_flag_followed_by_flag_has_no_value() {
        let list = args(&["yieldwatch", "--config", "--verbose"]);
        assert_eq!(arg_value_in(&list, "--config"), None);
    }
}
