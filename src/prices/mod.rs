//! Spot price board for the configured coins

use crate::apis::coingecko::types::SimplePrices;
use crate::apis::ApiManager;
use crate::config::{CoinConfig, PricesConfig};
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use crate::telegram::formatters::{format_price, html_escape};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub symbol: String,
    pub id: String,
    pub price: Option<f64>,
}

/// Quotes in configured coin order
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBoard {
    pub vs_currency: String,
    pub entries: Vec<PriceEntry>,
}

impl PriceBoard {
    /// Pick each coin's quote out of a `/simple/price` response
    pub fn from_prices(coins: &[CoinConfig], vs_currency: &str, prices: &SimplePrices) -> Self {
        let vs = vs_currency.to_lowercase();
        let entries = coins
            .iter()
            .map(|coin| PriceEntry {
                symbol: coin.symbol.clone(),
                id: coin.id.clone(),
                price: prices.get(&coin.id).and_then(|quotes| quotes.get(&vs)).copied(),
            })
            .collect();

        Self {
            vs_currency: vs,
            entries,
        }
    }
}

/// One request for every configured coin
pub async fn fetch_price_board(
    manager: &ApiManager,
    config: &PricesConfig,
) -> Result<PriceBoard, ApiError> {
    let ids: Vec<String> = config.coins.iter().map(|c| c.id.clone()).collect();
    let prices = manager
        .coingecko
        .fetch_simple_prices(&ids, &config.vs_currency)
        .await?;

    let board = PriceBoard::from_prices(&config.coins, &config.vs_currency, &prices);
    let missing = board.entries.iter().filter(|e| e.price.is_none()).count();
    if missing > 0 {
        logger::warning(
            LogTag::Prices,
            &format!("{} of {} coins missing from price response", missing, board.entries.len()),
        );
    }
    Ok(board)
}

/// Header line, then `BTC: $65,000.00` per coin
pub fn render_price_board(board: &PriceBoard) -> String {
    let mut out = String::from("💰 <b>Current prices</b>\n");
    for entry in &board.entries {
        let line = match entry.price {
            Some(price) if board.vs_currency == "usd" => {
                format!("<b>{}</b>: {}", html_escape(&entry.symbol), format_price(price))
            }
            Some(price) => format!(
                "<b>{}</b>: {} {}",
                html_escape(&entry.symbol),
                format_price(price).trim_start_matches('$'),
                board.vs_currency.to_uppercase()
            ),
            None => format!(
                "⚠️ Could not fetch price for {}",
                html_escape(&entry.id.to_uppercase())
            ),
        };
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// Shown when the whole request fails
pub fn render_price_error(error: &ApiError) -> String {
    format!(
        "❌ Could not fetch prices right now.\n<i>{}</i>",
        html_escape(&error.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_coins, Config};
    use std::collections::HashMap;

    fn prices() -> SimplePrices {
        let mut prices = HashMap::new();
        prices.insert(
            "bitcoin".to_string(),
            HashMap::from([("usd".to_string(), 65_000.0)]),
        );
        prices.insert(
            "ethereum".to_string(),
            HashMap::from([("usd".to_string(), 3_456.789)]),
        );
        prices
    }

    #[test]
    fn test_board_keeps_configured_order() {
        let board = PriceBoard::from_prices(&default_coins(), "USD", &prices());
        let symbols: Vec<&str> = board.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "CRV"]);
        assert_eq!(board.entries[0].price, Some(65_000.0));
        assert_eq!(board.entries[2].price, None);
    }

    #[test]
    fn test_render_board() {
        let board = PriceBoard::from_prices(&default_coins(), "usd", &prices());
        let text = render_price_board(&board);

        assert!(text.starts_with("💰 <b>Current prices</b>"));
        assert!(text.contains("<b>BTC</b>: $65,000.00"));
        assert!(text.contains("<b>ETH</b>: $3,456.79"));
        assert!(text.contains("Could not fetch price for CURVE-DAO-TOKEN"));
    }

    #[test]
    fn test_render_non_usd_board() {
        let mut eur = HashMap::new();
        eur.insert(
            "bitcoin".to_string(),
            HashMap::from([("eur".to_string(), 60_000.0)]),
        );
        let board = PriceBoard::from_prices(&default_coins()[..1], "eur", &eur);
        assert!(render_price_board(&board).contains("<b>BTC</b>: 60,000.00 EUR"));
    }

    #[test]
    fn test_render_error() {
        let text = render_price_error(&ApiError::Timeout);
        assert!(text.contains("Could not fetch prices"));
        assert!(text.contains("Request timeout"));
    }

    #[tokio::test]
    async fn test_unreachable_price_api() {
        let mut config = Config::default();
        config.prices.base_url = "http://127.0.0.1:1/api/v3".to_string();
        config.prices.timeout_secs = 5;
        let manager = ApiManager::from_config(&config).unwrap();

        let err = fetch_price_board(&manager, &config.prices)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));

        let text = render_price_error(&err);
        assert!(text.starts_with("❌ Could not fetch prices right now."));
        assert!(!text.contains("BTC"));
        assert_eq!(manager.coingecko.get_stats().await.failed_requests, 1);
    }
}
