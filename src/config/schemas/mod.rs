// Config schema submodule - one file per config section

use crate::config_struct;

mod chain;
mod defillama;
mod pools;
mod prices;
mod telegram;

pub use chain::*;
pub use defillama::*;
pub use pools::*;
pub use prices::*;
pub use telegram::*;

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Telegram bot configuration
        telegram: TelegramConfig = TelegramConfig::default(),

        /// Price board configuration
        prices: PricesConfig = PricesConfig::default(),

        /// Yield aggregator configuration
        defillama: DefiLlamaConfig = DefiLlamaConfig::default(),

        /// On-chain read configuration
        chain: ChainConfig = ChainConfig::default(),

        /// Pool report configuration
        pools: PoolsConfig = PoolsConfig::default(),
    }
}
