pub mod apis;
pub mod arguments;
pub mod chain;
pub mod config;
pub mod errors;
pub mod global;
pub mod logger;
pub mod paths;
pub mod pools;
pub mod prices;
pub mod run;
pub mod telegram;
