//! Error types for YieldWatch
//!
//! One enum per external collaborator. Command handlers turn these into
//! user-facing text; nothing here is fatal for the running bot.

use thiserror::Error;

// =============================================================================
// HTTP API ERRORS (CoinGecko, DefiLlama)
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API disabled")]
    Disabled,
}

impl ApiError {
    /// Classify a reqwest failure
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

// =============================================================================
// ON-CHAIN READ ERRORS
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("On-chain reads disabled (chain.rpc_url is empty)")]
    Disabled,

    #[error("Invalid RPC url '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Contract call {method} failed: {reason}")]
    CallFailed { method: String, reason: String },

    #[error("Contract call {0} timed out")]
    Timeout(String),

    #[error("Value does not fit into 128 bits: {0}")]
    Overflow(String),
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for String {
    fn from(err: ConfigError) -> String {
        err.to_string()
    }
}

#[derive(Debug, Clone, Error)]
pub enum PoolsConfigError {
    #[error("Pool config file '{0}' not found")]
    NotFound(String),

    #[error("Failed to read pool config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid JSON in pool config '{path}': {reason}")]
    Json { path: String, reason: String },

    #[error("Pool config '{0}' must contain a JSON array of objects")]
    NotAList(String),
}
