//! DefiLlama yields API response types

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// DEFILLAMA YIELDS RESPONSE
// ============================================================================

/// One pool from yields.llama.fi/pools
///
/// Every field is optional: the feed is large and loosely typed. A field of
/// the wrong type reads as `None` instead of rejecting the pool.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LlamaPool {
    #[serde(default, deserialize_with = "lenient")]
    pub pool: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub chain: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,
    #[serde(rename = "tvlUsd", default, deserialize_with = "lenient")]
    pub tvl_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub apy: Option<f64>,
    #[serde(rename = "apyBase", default, deserialize_with = "lenient")]
    pub apy_base: Option<f64>,
    #[serde(rename = "apyReward", default, deserialize_with = "lenient")]
    pub apy_reward: Option<f64>,
    #[serde(rename = "apyMean30d", default, deserialize_with = "lenient")]
    pub apy_mean_30d: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub stablecoin: Option<bool>,
    #[serde(rename = "ilRisk", default, deserialize_with = "lenient")]
    pub il_risk: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub exposure: Option<String>,
    #[serde(rename = "poolMeta", default, deserialize_with = "lenient")]
    pub pool_meta: Option<String>,
}

/// Accept any JSON value, keeping it only when it has the expected type
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl LlamaPool {
    /// Headline APY: `apy`, else `apyBase`
    pub fn effective_apy(&self) -> Option<f64> {
        self.apy.or(self.apy_base)
    }
}

/// Pools indexed by their `pool` id, in feed order
#[derive(Debug, Default)]
pub struct PoolIndex {
    pools: Vec<LlamaPool>,
    by_id: HashMap<String, usize>,
}

impl PoolIndex {
    /// Build from the response's `data` array; pools without an id are dropped
    pub fn from_pools(pools: impl IntoIterator<Item = LlamaPool>) -> Self {
        let mut index = PoolIndex::default();
        for pool in pools {
            let Some(id) = pool.pool.clone() else {
                continue;
            };
            index.by_id.insert(id, index.pools.len());
            index.pools.push(pool);
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&LlamaPool> {
        self.by_id.get(id).map(|&i| &self.pools[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LlamaPool> {
        self.pools.iter()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Parse a yields response body
///
/// `data` must be an array. Entries that are not objects or carry no string
/// `pool` id are skipped; returns the index and the number of raw entries.
pub fn parse_pools_response(body: Value) -> Result<(PoolIndex, usize), String> {
    let data = match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| "response has no 'data' field".to_string())?,
        other => {
            return Err(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))
        }
    };

    let Value::Array(entries) = data else {
        return Err(format!("'data' must be a list, got {}", json_kind(&data)));
    };

    let total = entries.len();
    let pools = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value::<LlamaPool>(entry).ok());
    Ok((PoolIndex::from_pools(pools), total))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
