use yieldwatch::{
    arguments::{is_check_enabled, is_help_requested, print_help},
    logger::{self as logger, LogTag},
};

/// Main entry point for YieldWatch
///
/// - `--help`: usage and exit
/// - `--check`: validate config and pool descriptors, then exit
/// - default: run the Telegram bot until SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Check for help request first (before any other processing)
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    // Ensure all directories exist BEFORE logger initialization
    // (Logger needs logs directory to create log files)
    if let Err(e) = yieldwatch::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if is_check_enabled() {
        match yieldwatch::run::run_check() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                logger::error(LogTag::System, &format!("❌ Check failed: {}", e));
                logger::flush();
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = yieldwatch::run::run_bot().await {
        logger::error(LogTag::System, &format!("❌ YieldWatch failed: {}", e));
        logger::flush();
        std::process::exit(1);
    }
}
