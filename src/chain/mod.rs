//! Direct smart-contract reads against an Ethereum JSON-RPC node
//!
//! Read-only `eth_call`s that give a fresher APY than the aggregator for
//! pools whose descriptor names an on-chain source:
//! - `aave_v3`: PoolDataProvider.getReserveData, RAY liquidity rate
//! - `compound_v3`: Comet.getSupplyRate(getUtilization()), per-second WAD rate

pub mod aave;
pub mod compound;
pub mod math;

use crate::config::ChainConfig;
use crate::errors::ChainError;
use crate::logger::{self, LogTag};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// On-chain APY source named by a pool descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnchainSource {
    /// Aave V3 reserve; `data_provider` defaults to `chain.aave_data_provider`
    AaveV3 {
        asset: String,
        #[serde(default)]
        data_provider: Option<String>,
    },
    /// Compound III market
    CompoundV3 { comet: String },
}

impl OnchainSource {
    pub fn label(&self) -> &'static str {
        match self {
            OnchainSource::AaveV3 { .. } => "aave-v3",
            OnchainSource::CompoundV3 { .. } => "compound-v3",
        }
    }
}

/// Rates read from a contract, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct OnchainRate {
    pub supply_apy: f64,
    pub borrow_apy: Option<f64>,
    pub source: &'static str,
}

/// Read-only client for the configured node
pub struct ChainReader {
    provider: Option<DynProvider>,
    default_data_provider: String,
    timeout: Duration,
}

impl ChainReader {
    /// Build a reader; an empty `rpc_url` gives a disabled reader
    pub fn new(config: &ChainConfig) -> Result<Self, ChainError> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));

        if !config.is_enabled() {
            logger::info(LogTag::Chain, "No RPC url configured, on-chain reads disabled");
            return Ok(Self {
                provider: None,
                default_data_provider: config.aave_data_provider.clone(),
                timeout,
            });
        }

        let rpc_url = config.rpc_url.trim();
        let url = url::Url::parse(rpc_url).map_err(|e| ChainError::InvalidRpcUrl {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        })?;

        logger::info(
            LogTag::Chain,
            &format!("On-chain reads enabled via {}", redact_url(&url)),
        );

        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            provider: Some(provider),
            default_data_provider: config.aave_data_provider.clone(),
            timeout,
        })
    }

    pub fn disabled() -> Self {
        Self {
            provider: None,
            default_data_provider: String::new(),
            timeout: Duration::from_secs(1),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Read the current rate for one descriptor's on-chain source
    pub async fn read_rate(&self, source: &OnchainSource) -> Result<OnchainRate, ChainError> {
        let provider = self.provider.as_ref().ok_or(ChainError::Disabled)?;

        match source {
            OnchainSource::AaveV3 {
                asset,
                data_provider,
            } => {
                let data_provider = data_provider
                    .as_deref()
                    .unwrap_or(&self.default_data_provider);
                aave::read_reserve_rates(provider, data_provider, asset, self.timeout).await
            }
            OnchainSource::CompoundV3 { comet } => {
                compound::read_supply_rate(provider, comet, self.timeout).await
            }
        }
    }
}

/// Parse a hex address; checksum casing is not enforced
pub fn parse_address(value: &str) -> Result<Address, ChainError> {
    Address::from_str(value.trim()).map_err(|_| ChainError::InvalidAddress(value.to_string()))
}

pub(crate) fn u256_to_u128(value: U256) -> Result<u128, ChainError> {
    u128::try_from(value).map_err(|_| ChainError::Overflow(value.to_string()))
}

/// Run a contract call with a deadline, mapping both failure kinds
pub(crate) async fn with_timeout<T, E, F>(
    method: &str,
    timeout: Duration,
    call: F,
) -> Result<T, ChainError>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ChainError::CallFailed {
            method: method.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ChainError::Timeout(method.to_string())),
    }
}

/// Hide API keys embedded in RPC urls (path segments and query)
fn redact_url(url: &url::Url) -> String {
    format!("{}://{}", url.scheme(), url.host_str().unwrap_or("unknown"))
}
