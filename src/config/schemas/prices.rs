//! Price board configuration (CoinGecko)

use crate::config_struct;
use serde::{Deserialize, Serialize};

/// A coin shown on the price board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinConfig {
    /// CoinGecko coin id (`bitcoin`, `curve-dao-token`, ...)
    pub id: String,
    /// Display ticker
    pub symbol: String,
}

impl CoinConfig {
    pub fn new(id: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// BTC, ETH and CRV
pub fn default_coins() -> Vec<CoinConfig> {
    vec![
        CoinConfig::new("bitcoin", "BTC"),
        CoinConfig::new("ethereum", "ETH"),
        CoinConfig::new("curve-dao-token", "CRV"),
    ]
}

config_struct! {
    /// Price-quote API settings
    pub struct PricesConfig {
        base_url: String = "https://api.coingecko.com/api/v3".to_string(),

        /// Demo API key, sent as x-cg-demo-api-key when set
        api_key: String = String::new(),

        /// Quote currency
        vs_currency: String = "usd".to_string(),

        timeout_secs: u64 = 20,

        /// Coins on the board, in display order
        coins: Vec<CoinConfig> = default_coins(),
    }
}
