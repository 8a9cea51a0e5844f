//! DefiLlama yields API client
//!
//! API Documentation: https://defillama.com/docs/api
//!
//! Endpoints implemented:
//! 1. yields.llama.fi/pools - Every tracked pool with APY and TVL
//!
//! The pool list is several megabytes, so the parsed index is kept in memory
//! for `defillama.cache_ttl_secs` and shared between concurrent reports.

pub mod types;

use self::types::{parse_pools_response, PoolIndex};
use crate::apis::client::{check_status, HttpClient};
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::DefiLlamaConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CachedIndex {
    fetched_at: Instant,
    index: Arc<PoolIndex>,
}

pub struct DefiLlamaClient {
    http_client: HttpClient,
    stats: Arc<ApiStatsTracker>,
    pools_url: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedIndex>>,
    enabled: bool,
}

impl DefiLlamaClient {
    pub fn new(config: &DefiLlamaConfig, enabled: bool) -> Result<Self, String> {
        Ok(Self {
            http_client: HttpClient::new(config.timeout_secs)?,
            stats: Arc::new(ApiStatsTracker::new()),
            pools_url: config.pools_url.clone(),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            cache: Mutex::new(None),
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    /// Current pool index, from cache when still fresh
    pub async fn fetch_pool_index(&self) -> Result<Arc<PoolIndex>, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        // Held across the fetch so concurrent reports share one download
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if !self.cache_ttl.is_zero() && cached.fetched_at.elapsed() < self.cache_ttl {
                self.stats.record_cache_hit().await;
                return Ok(cached.index.clone());
            }
        }

        let index = Arc::new(self.download_pool_index().await?);
        if !self.cache_ttl.is_zero() {
            *cache = Some(CachedIndex {
                fetched_at: Instant::now(),
                index: index.clone(),
            });
        }
        Ok(index)
    }

    /// Forget the cached index
    pub async fn invalidate_cache(&self) {
        *self.cache.lock().await = None;
    }

    async fn download_pool_index(&self) -> Result<PoolIndex, ApiError> {
        let start = Instant::now();
        logger::debug(
            LogTag::Api,
            &format!("DefiLlama request: {}", self.pools_url),
        );

        let result = async {
            let response = self
                .http_client
                .client()
                .get(&self.pools_url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| ApiError::from_reqwest(&e))?;
            let response = check_status(response, "defillama/pools")?;
            let body: Value = response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
            parse_pools_response(body).map_err(ApiError::InvalidResponse)
        }
        .await;

        let elapsed = start.elapsed().as_millis() as f64;
        match result {
            Ok((index, total)) => {
                self.stats.record_request(true, elapsed).await;
                let skipped = total.saturating_sub(index.len());
                if skipped > 0 {
                    logger::debug(
                        LogTag::Api,
                        &format!("DefiLlama: skipped {} entries without a pool id", skipped),
                    );
                }
                logger::info(
                    LogTag::Api,
                    &format!(
                        "DefiLlama: indexed {} of {} pools in {:.0}ms",
                        index.len(),
                        total,
                        elapsed
                    ),
                );
                Ok(index)
            }
            Err(e) => {
                self.stats.record_error(elapsed, &e.to_string()).await;
                logger::warning(LogTag::Api, &format!("DefiLlama request failed: {}", e));
                Err(e)
            }
        }
    }

    #[cfg(test)]
    async fn seed_cache(&self, index: PoolIndex) {
        *self.cache.lock().await = Some(CachedIndex {
            fetched_at: Instant::now(),
            index: Arc::new(index),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::types::LlamaPool;
    use super::*;
    use serde_json::json;

    const FIXTURE: &str = r#"{
        "status": "success",
        "data": [
            {"pool": "aa70268e-4b52-42bf-a116-608b370f9501", "chain": "Ethereum",
             "project": "aave-v3", "symbol": "USDC", "tvlUsd": 1234567890.5,
             "apy": 4.21, "apyBase": 4.21, "apyReward": null, "stablecoin": true,
             "ilRisk": "no", "exposure": "single", "poolMeta": null},
            {"chain": "Ethereum", "project": "lido", "symbol": "STETH", "apy": 3.1},
            {"pool": "7da72d09-56ca-4ec5-a45f-59114353e487", "chain": "Arbitrum",
             "project": "compound-v3", "symbol": "USDC", "tvlUsd": 5000000,
             "apy": null, "apyBase": 5.5},
            "garbage"
        ]
    }"#;

    #[test]
    fn test_parse_pools_response() {
        let body: Value = serde_json::from_str(FIXTURE).unwrap();
        let (index, total) = parse_pools_response(body).unwrap();

        assert_eq!(total, 4);
        assert_eq!(index.len(), 2);

        let aave = index.get("aa70268e-4b52-42bf-a116-608b370f9501").unwrap();
        assert_eq!(aave.project.as_deref(), Some("aave-v3"));
        assert_eq!(aave.tvl_usd, Some(1234567890.5));
        assert_eq!(aave.stablecoin, Some(true));

        let comet = index.get("7da72d09-56ca-4ec5-a45f-59114353e487").unwrap();
        assert_eq!(comet.effective_apy(), Some(5.5));
    }

    #[test]
    fn test_mistyped_fields_keep_the_pool() {
        let body = json!({
            "data": [
                {"pool": "keep-me", "chain": "Ethereum", "project": "aave-v3",
                 "symbol": "USDC", "apy": 4.2, "tvlUsd": 1000.0,
                 "poolMeta": 7, "apyMean30d": "n/a", "stablecoin": "yes"},
                {"pool": 12, "apy": 1.0},
                42
            ]
        });
        let (index, total) = parse_pools_response(body).unwrap();

        assert_eq!(total, 3);
        assert_eq!(index.len(), 1);

        let pool = index.get("keep-me").unwrap();
        assert_eq!(pool.apy, Some(4.2));
        assert_eq!(pool.tvl_usd, Some(1000.0));
        assert_eq!(pool.pool_meta, None);
        assert_eq!(pool.apy_mean_30d, None);
        assert_eq!(pool.stablecoin, None);
    }

    #[test]
    fn test_data_must_be_a_list() {
        let err = parse_pools_response(json!({"status": "success", "data": {"pool": "x"}}))
            .unwrap_err();
        assert!(err.contains("must be a list"));

        assert!(parse_pools_response(json!({"status": "error"})).is_err());
        assert!(parse_pools_response(json!([1, 2])).is_err());
    }

    #[test]
    fn test_effective_apy_prefers_apy() {
        let pool = LlamaPool {
            apy: Some(7.0),
            apy_base: Some(3.0),
            ..LlamaPool::default()
        };
        assert_eq!(pool.effective_apy(), Some(7.0));
        assert_eq!(LlamaPool::default().effective_apy(), None);
    }

    #[tokio::test]
    async fn test_cached_index_is_reused() {
        let client = DefiLlamaClient::new(&DefiLlamaConfig::default(), true).unwrap();
        client
            .seed_cache(PoolIndex::from_pools(vec![LlamaPool {
                pool: Some("abc".to_string()),
                ..LlamaPool::default()
            }]))
            .await;

        let index = client.fetch_pool_index().await.unwrap();
        assert!(index.get("abc").is_some());
        assert_eq!(client.get_stats().await.cache_hits, 1);
        assert_eq!(client.get_stats().await.total_requests, 0);
    }

    #[tokio::test]
    async fn test_disabled_client() {
        let client = DefiLlamaClient::new(&DefiLlamaConfig::default(), false).unwrap();
        assert!(matches!(
            client.fetch_pool_index().await,
            Err(ApiError::Disabled)
        ));
    }
}
