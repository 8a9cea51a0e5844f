//! On-chain read configuration

use crate::config_struct;

/// Aave V3 PoolDataProvider on Ethereum mainnet
pub const AAVE_V3_DATA_PROVIDER_MAINNET: &str = "0x7B4EB56E7CD4b454BA8ff71E4518426369a138a3";

config_struct! {
    /// Ethereum JSON-RPC settings
    pub struct ChainConfig {
        /// JSON-RPC endpoint (ETH_RPC_URL overrides it; empty disables on-chain reads)
        rpc_url: String = String::new(),

        /// Default Aave V3 PoolDataProvider used by `aave_v3` descriptors
        aave_data_provider: String = AAVE_V3_DATA_PROVIDER_MAINNET.to_string(),

        timeout_secs: u64 = 20,
    }
}

impl ChainConfig {
    pub fn is_enabled(&self) -> bool {
        !self.rpc_url.trim().is_empty()
    }
}
