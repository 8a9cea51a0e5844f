//! Pool report configuration

use crate::config_struct;

config_struct! {
    /// Where the pool descriptors live and how reports look
    pub struct PoolsConfig {
        /// Path to pools_config.json (empty = <data dir>/pools_config.json)
        config_path: String = String::new(),

        /// List unmatched pools in reports instead of hiding them
        show_not_found: bool = true,
    }
}
