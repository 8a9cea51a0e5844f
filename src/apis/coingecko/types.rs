//! CoinGecko API response types

use serde_json::Value;
use std::collections::HashMap;

/// Raw `/simple/price` body: `{ "<coin id>": { "<vs currency>": <number> } }`
///
/// Values are kept as JSON so a `null` quote for one coin does not fail the
/// whole response.
pub type SimplePriceResponse = HashMap<String, HashMap<String, Value>>;

/// Quotes keyed by coin id, then by vs currency
pub type SimplePrices = HashMap<String, HashMap<String, f64>>;

/// Drop non-numeric quotes
pub fn into_prices(raw: SimplePriceResponse) -> SimplePrices {
    raw.into_iter()
        .map(|(id, quotes)| {
            let quotes = quotes
                .into_iter()
                .filter_map(|(vs, value)| value.as_f64().map(|price| (vs, price)))
                .collect();
            (id, quotes)
        })
        .collect()
}
