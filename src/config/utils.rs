use super::schemas::Config;
/// Configuration utilities - loading, validation, and access helpers
///
/// - Loading configuration from disk (TOML)
/// - Environment overrides for secrets (.env supported)
/// - Thread-safe access helpers
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
///
/// Starts with defaults; `load_config_from_path` replaces it at startup.
pub static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Environment variables that override config values
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_RPC_URL: &str = "ETH_RPC_URL";
pub const ENV_COINGECKO_KEY: &str = "COINGECKO_API_KEY";

/// Parse a TOML document into a Config (missing keys use defaults)
pub fn parse_config_str(contents: &str) -> Result<Config, ConfigError> {
    toml::from_str::<Config>(contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Load configuration from a specific file path and install it globally
///
/// If the file doesn't exist, default values are used. Environment overrides
/// (including a `.env` file in the working directory) are applied on top.
pub fn load_config_from_path(path: &Path) -> Result<(), ConfigError> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        parse_config_str(&contents)?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    if dotenv::dotenv().is_ok() {
        logger::debug(LogTag::Config, "Loaded environment from .env");
    }
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    set_config(config);
    Ok(())
}

/// Apply environment overrides using the given lookup
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// a configured value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(ENV_BOT_TOKEN) {
        config.telegram.bot_token = token;
    }
    if let Some(url) = non_empty(ENV_RPC_URL) {
        config.chain.rpc_url = url;
    }
    if let Some(key) = non_empty(ENV_COINGECKO_KEY) {
        config.prices.api_key = key;
    }
}

/// Check the values the bot cannot run without
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.telegram.bot_token.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "telegram.bot_token is empty (set it in config.toml or {})",
            ENV_BOT_TOKEN
        )));
    }
    if config.prices.coins.is_empty() {
        return Err(ConfigError::Invalid("prices.coins is empty".to_string()));
    }
    if config.prices.coins.iter().any(|c| c.id.trim().is_empty()) {
        return Err(ConfigError::Invalid("prices.coins contains an empty id".to_string()));
    }

    let timeouts = [
        ("telegram.request_timeout_secs", config.telegram.request_timeout_secs),
        ("telegram.connect_timeout_secs", config.telegram.connect_timeout_secs),
        ("prices.timeout_secs", config.prices.timeout_secs),
        ("defillama.timeout_secs", config.defillama.timeout_secs),
        ("chain.timeout_secs", config.chain.timeout_secs),
    ];
    if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
        return Err(ConfigError::Invalid(format!("{} must be greater than zero", name)));
    }

    if u32::try_from(config.telegram.polling_timeout_secs).is_err() {
        return Err(ConfigError::Invalid(
            "telegram.polling_timeout_secs is out of range".to_string(),
        ));
    }

    if config.telegram.polling_timeout_secs >= config.telegram.request_timeout_secs {
        return Err(ConfigError::Invalid(
            "telegram.polling_timeout_secs must be lower than telegram.request_timeout_secs"
                .to_string(),
        ));
    }

    Ok(())
}

/// Replace the global configuration
pub fn set_config(config: Config) {
    let mut guard = CONFIG.write().unwrap_or_else(|e| e.into_inner());
    *guard = config;
}

/// Execute a function with read access to the configuration
///
/// # Example
/// ```ignore
/// use yieldwatch::config::with_config;
///
/// let vs = with_config(|cfg| cfg.prices.vs_currency.clone());
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config = CONFIG.read().unwrap_or_else(|e| e.into_inner());
    f(&config)
}

/// Get a clone of the entire configuration
///
/// Useful when values are needed across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config.prices.vs_currency, "usd");
        assert_eq!(config.prices.coins.len(), 3);
        assert_eq!(config.prices.coins[2].id, "curve-dao-token");
        assert_eq!(config.defillama.pools_url, "https://yields.llama.fi/pools");
        assert!(!config.chain.is_enabled());
        assert!(config.telegram.commands_enabled);
    }

    #[test]
    fn test_partial_section_overrides_only_named_keys() {
        let config = parse_config_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            allowed_chat_ids = [42]

            [[prices.coins]]
            id = "solana"
            symbol = "SOL"

            [chain]
            rpc_url = "http://localhost:8545"
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.telegram.polling_timeout_secs, 10);
        assert!(config.telegram.is_chat_allowed(42));
        assert!(!config.telegram.is_chat_allowed(7));
        assert_eq!(config.prices.coins.len(), 1);
        assert_eq!(config.prices.coins[0].symbol, "SOL");
        assert!(config.chain.is_enabled());
        assert_eq!(config.chain.timeout_secs, 20);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config_str("[telegram\nbot_token = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BOT_TOKEN, "999:env"),
            (ENV_RPC_URL, "  "),
            (ENV_COINGECKO_KEY, "cg-key"),
        ]
        .into_iter()
        .collect();

        let mut config = parse_config_str("[chain]\nrpc_url = \"http://node\"").unwrap();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.telegram.bot_token, "999:env");
        assert_eq!(config.chain.rpc_url, "http://node");
        assert_eq!(config.prices.api_key, "cg-key");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        assert!(validate_config(&config).is_err());

        config.telegram.bot_token = "123:abc".to_string();
        assert!(validate_config(&config).is_ok());

        config.telegram.polling_timeout_secs = 30;
        assert!(validate_config(&config).is_err());

        config.telegram.polling_timeout_secs = 10;
        config.defillama.timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        config.defillama.timeout_secs = 30;
        config.prices.coins.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_polling_timeout_must_fit_u32() {
        let mut config = Config::default();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.polling_timeout_secs = u64::from(u32::MAX) + 1;
        config.telegram.request_timeout_secs = u64::MAX;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config_from_path(&path).is_ok());
        assert_eq!(with_config(|c| c.defillama.cache_ttl_secs), 300);
    }
}
