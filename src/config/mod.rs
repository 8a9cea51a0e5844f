//! Configuration system for YieldWatch
//!
//! A single TOML file with one table per concern (`[telegram]`, `[prices]`,
//! `[defillama]`, `[chain]`, `[pools]`). Every field has an embedded default,
//! so the file only needs the values that differ - usually just the bot
//! token, which can also come from the environment.

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{
    apply_env_overrides, get_config_clone, load_config_from_path, parse_config_str, set_config,
    validate_config, with_config,
};
