//! Pool descriptors loaded from `pools_config.json`

use crate::chain::OnchainSource;
use crate::errors::PoolsConfigError;
use crate::logger::{self, LogTag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Group used when neither `group` nor `symbol` yields one
pub const FALLBACK_GROUP: &str = "OTHER";

/// Network used for descriptors without a `chain`
pub const UNKNOWN_NETWORK: &str = "Unknown";

/// A pool to track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolDescriptor {
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub symbol: String,
    /// DefiLlama pool UUID
    #[serde(default, alias = "defillama_id")]
    pub defilama_id: String,
    #[serde(default)]
    pub user_comment: String,
    /// Menu group; derived from `symbol` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onchain: Option<OnchainSource>,
}

impl PoolDescriptor {
    /// Name shown in reports
    pub fn display_name(&self) -> &str {
        [&self.user_comment, &self.symbol, &self.defilama_id]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("unnamed pool")
    }

    pub fn network(&self) -> &str {
        let chain = self.chain.trim();
        if chain.is_empty() {
            UNKNOWN_NETWORK
        } else {
            chain
        }
    }

    /// Explicit group, else the first token of the symbol upper-cased
    /// (`DAI-USDC-USDT` -> `DAI`, `wstETH` -> `WSTETH`)
    pub fn group(&self) -> String {
        if let Some(group) = self.group.as_deref().map(str::trim) {
            if !group.is_empty() {
                return group.to_string();
            }
        }

        self.symbol
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find(|token| !token.is_empty())
            .map(|token| token.to_ascii_uppercase())
            .unwrap_or_else(|| FALLBACK_GROUP.to_string())
    }
}

/// Parse descriptor JSON text; `source` names the file in errors
pub fn parse_pool_descriptors(
    text: &str,
    source: &str,
) -> Result<Vec<PoolDescriptor>, PoolsConfigError> {
    let value: Value = serde_json::from_str(text).map_err(|e| PoolsConfigError::Json {
        path: source.to_string(),
        reason: e.to_string(),
    })?;

    let Value::Array(entries) = value else {
        return Err(PoolsConfigError::NotAList(source.to_string()));
    };

    let mut descriptors = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            logger::warning(
                LogTag::Pools,
                &format!("{}: entry #{} is not an object, skipped", source, position + 1),
            );
            continue;
        }

        match serde_json::from_value::<PoolDescriptor>(entry) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(e) => logger::warning(
                LogTag::Pools,
                &format!("{}: entry #{} skipped: {}", source, position + 1, e),
            ),
        }
    }

    Ok(descriptors)
}

/// Load descriptors from a JSON file containing an array of objects
pub fn load_pool_descriptors(path: &Path) -> Result<Vec<PoolDescriptor>, PoolsConfigError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(PoolsConfigError::NotFound(display));
    }

    let text = std::fs::read_to_string(path).map_err(|e| PoolsConfigError::Read {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    let descriptors = parse_pool_descriptors(&text, &display)?;
    logger::info(
        LogTag::Pools,
        &format!("Loaded {} pool descriptors from {}", descriptors.len(), display),
    );
    Ok(descriptors)
}
