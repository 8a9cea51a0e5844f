//! Global API manager singleton - one instance of every outbound client
//! shared by all command handlers, so stats and the pool cache are global

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::chain::ChainReader;
use crate::config::Config;
use crate::logger::{self, LogTag};

use super::coingecko::CoinGeckoClient;
use super::defillama::DefiLlamaClient;
use super::stats::ApiStats;

/// Holds the price client, the yields client and the on-chain reader
pub struct ApiManager {
    pub coingecko: CoinGeckoClient,
    pub defillama: DefiLlamaClient,
    pub chain: ChainReader,
}

impl ApiManager {
    /// Build every client from `cfg`
    ///
    /// An invalid RPC url only disables on-chain reads; HTTP client failures
    /// are fatal.
    pub fn from_config(cfg: &Config) -> Result<Self, String> {
        logger::info(LogTag::Api, "Initializing global API manager");

        let coingecko = CoinGeckoClient::new(&cfg.prices, true)
            .map_err(|e| format!("Failed to initialize CoinGecko client: {}", e))?;
        let defillama = DefiLlamaClient::new(&cfg.defillama, true)
            .map_err(|e| format!("Failed to initialize DefiLlama client: {}", e))?;

        let chain = ChainReader::new(&cfg.chain).unwrap_or_else(|e| {
            logger::warning(LogTag::Chain, &format!("{} - on-chain reads disabled", e));
            ChainReader::disabled()
        });

        Ok(Self {
            coingecko,
            defillama,
            chain,
        })
    }

    /// Get aggregated stats from all API clients
    pub async fn get_all_stats(&self) -> ApiManagerStats {
        ApiManagerStats {
            coingecko: self.coingecko.get_stats().await,
            defillama: self.defillama.get_stats().await,
            chain_enabled: self.chain.is_enabled(),
        }
    }
}

/// Aggregated stats from all API clients
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiManagerStats {
    pub coingecko: ApiStats,
    pub defillama: ApiStats,
    pub chain_enabled: bool,
}

static GLOBAL_API_MANAGER: OnceCell<Arc<ApiManager>> = OnceCell::new();

/// Create the global manager; called once at startup after config loading
pub fn init_api_manager(cfg: &Config) -> Result<Arc<ApiManager>, String> {
    GLOBAL_API_MANAGER
        .get_or_try_init(|| ApiManager::from_config(cfg).map(Arc::new))
        .cloned()
}

/// Get the global API manager
pub fn get_api_manager() -> Result<Arc<ApiManager>, String> {
    GLOBAL_API_MANAGER
        .get()
        .cloned()
        .ok_or_else(|| "API manager not initialized".to_string())
}
