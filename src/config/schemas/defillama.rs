//! Yield aggregator configuration (DefiLlama)

use crate::config_struct;

config_struct! {
    /// DefiLlama yields API settings
    pub struct DefiLlamaConfig {
        /// Full pool list endpoint
        pools_url: String = "https://yields.llama.fi/pools".to_string(),

        /// The pool list is large, give it time
        timeout_secs: u64 = 30,

        /// Reuse a fetched pool index for this many seconds (0 = always refetch)
        cache_ttl_secs: u64 = 300,
    }
}
