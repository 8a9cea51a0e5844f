//! Bot lifecycle: startup order, polling, graceful shutdown

use crate::apis::init_api_manager;
use crate::config::{get_config_clone, load_config_from_path, validate_config, Config};
use crate::global;
use crate::logger::{self, LogTag};
use crate::paths;
use crate::pools::{init_registry, load_pool_descriptors, PoolRegistry};
use crate::telegram;
use std::sync::Arc;
use tokio::sync::Notify;

/// Load config.toml (plus environment) and install it globally
pub fn load_configuration() -> Result<Config, String> {
    let config_path = paths::get_config_path();
    logger::info(
        LogTag::Config,
        &format!("Loading configuration from {}", config_path.display()),
    );
    load_config_from_path(&config_path).map_err(String::from)?;
    Ok(get_config_clone())
}

/// Load the pool descriptors; any failure is logged and yields an empty
/// registry so prices keep working
pub fn load_pool_registry(config: &Config) -> PoolRegistry {
    let path = paths::get_pools_config_path(&config.pools.config_path);
    match load_pool_descriptors(&path) {
        Ok(descriptors) => {
            if descriptors.is_empty() {
                logger::warning(
                    LogTag::Pools,
                    &format!("{} contains no pools", path.display()),
                );
            }
            PoolRegistry::new(descriptors)
        }
        Err(e) => {
            logger::error(
                LogTag::Pools,
                &format!("{} - continuing with an empty pool list", e),
            );
            PoolRegistry::default()
        }
    }
}

/// `--check`: load everything, print a summary, never touch the network
pub fn run_check() -> Result<(), String> {
    let config = load_configuration()?;
    let registry = load_pool_registry(&config);

    println!("Configuration: {}", paths::get_config_path().display());
    println!(
        "Pools file:    {}",
        paths::get_pools_config_path(&config.pools.config_path).display()
    );
    println!(
        "Coins:         {}",
        config
            .prices
            .coins
            .iter()
            .map(|c| c.symbol.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Pools:         {} on {} networks",
        registry.len(),
        registry.networks().len()
    );
    for network in registry.networks() {
        println!("  {}: {}", network, registry.groups(&network).join(", "));
    }
    println!(
        "On-chain:      {}",
        if config.chain.is_enabled() {
            "enabled"
        } else {
            "disabled (no RPC url)"
        }
    );

    validate_config(&config).map_err(String::from)?;
    println!("Configuration OK");
    Ok(())
}

/// Main bot execution function - handles the full bot lifecycle
pub async fn run_bot() -> Result<(), String> {
    global::mark_startup();
    logger::info(LogTag::System, "YieldWatch starting up...");

    // 1. Configuration (+ environment) and validation
    let config = load_configuration()?;
    validate_config(&config).map_err(|e| {
        logger::error(LogTag::Config, &e.to_string());
        String::from(e)
    })?;

    // 2. Pool registry
    init_registry(load_pool_registry(&config));

    // 3. Outbound clients
    init_api_manager(&config)?;

    // 4. Bot
    let bot = telegram::connect(&config.telegram).await?;

    // 5. Polling until a shutdown signal
    let polling_timeout = u32::try_from(config.telegram.polling_timeout_secs)
        .map_err(|_| "telegram.polling_timeout_secs is out of range".to_string())?;
    let shutdown = Arc::new(Notify::new());
    let polling = tokio::spawn(telegram::run_polling(
        bot,
        polling_timeout,
        shutdown.clone(),
    ));
    global::set_bot_ready(true);
    logger::info(LogTag::System, "✅ YieldWatch is running");

    let signal_result = wait_for_shutdown_signal().await;

    // 6. Graceful stop
    logger::info(LogTag::System, "Initiating graceful shutdown...");
    global::set_bot_ready(false);
    shutdown.notify_one();
    if let Err(e) = polling.await {
        logger::warning(LogTag::System, &format!("Polling task ended abnormally: {}", e));
    }

    logger::info(LogTag::System, "YieldWatch shut down successfully");
    logger::flush();
    signal_result
}

/// Wait for SIGINT/SIGTERM (Ctrl+C on Windows)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    logger::info(
        LogTag::System,
        "Waiting for shutdown signal (press Ctrl+C twice to force kill)",
    );

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).map_err(|e| format!("Failed to bind SIGINT: {}", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(windows)]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!(
            "Shutdown signal received ({}). Press Ctrl+C again to force kill.",
            signal_name
        ),
    );

    // A second Ctrl+C during graceful shutdown exits immediately
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::error(LogTag::System, "Second Ctrl+C detected, forcing exit.");
            logger::flush();
            std::process::exit(130);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_pools_file_gives_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.pools.config_path = dir.path().join("absent.json").display().to_string();

        assert!(load_pool_registry(&config).is_empty());
    }

    #[test]
    fn test_pools_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"chain": "Ethereum", "project": "aave-v3", "symbol": "USDC",
                  "defilama_id": "abc", "user_comment": "Aave USDC"}]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.pools.config_path = file.path().display().to_string();
        let registry = load_pool_registry(&config);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.networks(), vec!["Ethereum"]);
    }
}
