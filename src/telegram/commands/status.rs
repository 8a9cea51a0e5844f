//! /status

use crate::apis::{get_api_manager, ApiStats};
use crate::global;
use crate::pools::get_registry;
use crate::telegram::formatters::{format_duration, html_escape};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn format_api_line(name: &str, stats: &ApiStats) -> String {
    if stats.total_requests == 0 && stats.cache_hits == 0 {
        return format!("{}: no requests yet", name);
    }

    let mut line = format!(
        "{}: {} requests, {} failed, avg {:.0}ms",
        name, stats.total_requests, stats.failed_requests, stats.average_response_time_ms
    );
    if stats.cache_hits > 0 {
        line.push_str(&format!(", {} cached", stats.cache_hits));
    }
    if let Some(error) = &stats.last_error {
        line.push_str(&format!("\n   last error: <i>{}</i>", html_escape(error)));
    }
    line
}

/// Handle /status command
pub async fn handle_status_command() -> String {
    let registry = get_registry();
    let uptime = format_duration(global::uptime_secs());
    let status_emoji = if global::is_bot_ready() { "🟢" } else { "🟡" };

    let mut text = format!(
        "{} <b>YieldWatch Status</b>\n\n\
         Version: {}\n\
         Uptime: {}\n\
         Pools loaded: {} on {} networks",
        status_emoji,
        VERSION,
        uptime,
        registry.len(),
        registry.networks().len()
    );

    match get_api_manager() {
        Ok(manager) => {
            let stats = manager.get_all_stats().await;
            text.push_str(&format!(
                "\nOn-chain reads: {}\n\n<b>APIs</b>\n{}\n{}",
                if stats.chain_enabled { "enabled ✅" } else { "disabled" },
                format_api_line("CoinGecko", &stats.coingecko),
                format_api_line("DefiLlama", &stats.defillama)
            ));
        }
        Err(e) => text.push_str(&format!("\n\n⚠️ {}", html_escape(&e))),
    }

    text
}
