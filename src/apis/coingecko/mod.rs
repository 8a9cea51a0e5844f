//! CoinGecko API client
//!
//! API Documentation: https://docs.coingecko.com/reference/introduction
//!
//! Endpoints implemented:
//! 1. /simple/price?ids=...&vs_currencies=... - Spot prices for a list of coins

pub mod types;

use self::types::{into_prices, SimplePriceResponse, SimplePrices};
use crate::apis::client::{check_status, HttpClient};
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::PricesConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Instant;

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoClient {
    http_client: HttpClient,
    stats: Arc<ApiStatsTracker>,
    base_url: String,
    api_key: Option<String>,
    enabled: bool,
}

impl CoinGeckoClient {
    pub fn new(config: &PricesConfig, enabled: bool) -> Result<Self, String> {
        let http_client = HttpClient::new(config.timeout_secs)?;
        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            http_client,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    /// Spot prices for `ids` in `vs_currency` (single request)
    pub async fn fetch_simple_prices(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<SimplePrices, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let url = simple_price_url(&self.base_url, ids, vs_currency);
        logger::debug(LogTag::Api, &format!("CoinGecko request: {}", url));

        let start = Instant::now();
        let mut request = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let result = async {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::from_reqwest(&e))?;
            let response = check_status(response, "coingecko/simple/price")?;
            response
                .json::<SimplePriceResponse>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))
        }
        .await;

        let elapsed = start.elapsed().as_millis() as f64;
        match result {
            Ok(raw) => {
                self.stats.record_request(true, elapsed).await;
                Ok(into_prices(raw))
            }
            Err(e) => {
                self.stats.record_error(elapsed, &e.to_string()).await;
                logger::warning(LogTag::Api, &format!("CoinGecko request failed: {}", e));
                Err(e)
            }
        }
    }
}

fn simple_price_url(base_url: &str, ids: &[String], vs_currency: &str) -> String {
    format!(
        "{}/simple/price?ids={}&vs_currencies={}",
        base_url,
        ids.join(","),
        vs_currency
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_price_url() {
        let ids = vec!["bitcoin".to_string(), "curve-dao-token".to_string()];
        assert_eq!(
            simple_price_url("https://api.coingecko.com/api/v3", &ids, "usd"),
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,curve-dao-token&vs_currencies=usd"
        );
    }

    #[test]
    fn test_response_parsing_skips_null_quotes() {
        let raw: SimplePriceResponse = serde_json::from_str(
            r#"{"bitcoin": {"usd": 65000.5}, "ethereum": {"usd": null}, "curve-dao-token": {}}"#,
        )
        .unwrap();
        let prices = into_prices(raw);

        assert_eq!(prices["bitcoin"]["usd"], 65000.5);
        assert!(prices["ethereum"].get("usd").is_none());
        assert!(prices["curve-dao-token"].is_empty());
    }

    #[tokio::test]
    async fn test_disabled_client() {
        let client = CoinGeckoClient::new(&PricesConfig::default(), false).unwrap();
        let result = client
            .fetch_simple_prices(&["bitcoin".to_string()], "usd")
            .await;
        assert!(matches!(result, Err(ApiError::Disabled)));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = PricesConfig {
            api_key: "  ".to_string(),
            base_url: "https://example.com/api/v3/".to_string(),
            ..PricesConfig::default()
        };
        let client = CoinGeckoClient::new(&config, true).unwrap();
        assert!(client.api_key.is_none());
        assert_eq!(client.base_url, "https://example.com/api/v3");
    }
}
