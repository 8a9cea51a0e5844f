//! Outbound HTTP APIs: CoinGecko prices and DefiLlama yields

pub mod client;
pub mod coingecko;
pub mod defillama;
pub mod manager;
pub mod stats;

pub use manager::{get_api_manager, init_api_manager, ApiManager, ApiManagerStats};
pub use stats::{ApiStats, ApiStatsTracker};
