//! /pools and the pool report views

use super::{send_html, show, LOADING_TEXT};
use crate::apis::{get_api_manager, ApiManager};
use crate::config::with_config;
use crate::logger::{self, LogTag};
use crate::pools::{build_report, get_registry, render_report, PoolDescriptor, PoolRegistry};
use crate::telegram::formatters::html_escape;
use crate::telegram::keyboards;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

/// Which descriptors a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSelection {
    All,
    Network(usize),
    Group { network: usize, group: usize },
}

/// A selection resolved against the registry
#[derive(Debug)]
pub struct ResolvedSelection {
    pub title: String,
    pub descriptors: Vec<PoolDescriptor>,
    pub refresh_data: String,
    pub back_data: String,
}

impl ReportSelection {
    /// `None` when an index no longer exists in the registry
    pub fn resolve(&self, registry: &PoolRegistry) -> Option<ResolvedSelection> {
        match *self {
            ReportSelection::All => Some(ResolvedSelection {
                title: "All pools".to_string(),
                descriptors: registry.all().to_vec(),
                refresh_data: "pools:all".to_string(),
                back_data: "menu:networks".to_string(),
            }),
            ReportSelection::Network(n) => {
                let network = registry.network_at(n)?;
                Some(ResolvedSelection {
                    title: format!("{} · all groups", network),
                    descriptors: registry.select(&network, None),
                    refresh_data: format!("grp:{}:all", n),
                    back_data: format!("net:{}", n),
                })
            }
            ReportSelection::Group { network, group } => {
                let (network_name, group_name) = registry.group_at(network, group)?;
                Some(ResolvedSelection {
                    title: format!("{} · {}", network_name, group_name),
                    descriptors: registry.select(&network_name, Some(&group_name)),
                    refresh_data: format!("grp:{}:{}", network, group),
                    back_data: format!("net:{}", network),
                })
            }
        }
    }
}

/// Build and render the report text for `descriptors`
pub async fn report_text(title: &str, descriptors: &[PoolDescriptor]) -> Result<String, String> {
    if descriptors.is_empty() {
        return Ok(format!(
            "📊 <b>{}</b>\n\nNo pools configured.",
            html_escape(title)
        ));
    }

    let manager = get_api_manager()?;
    let show_not_found = with_config(|cfg| cfg.pools.show_not_found);

    Ok(pool_report_text(title, descriptors, &manager, show_not_found).await)
}

/// Report text from `manager`; a failed fetch becomes the error text
async fn pool_report_text(
    title: &str,
    descriptors: &[PoolDescriptor],
    manager: &ApiManager,
    show_not_found: bool,
) -> String {
    match build_report(descriptors, manager).await {
        Ok(lines) => render_report(title, &lines, show_not_found),
        Err(e) => {
            logger::warning(
                LogTag::Pools,
                &format!("Pool report '{}' failed: {}", title, e),
            );
            format!(
                "❌ Could not fetch pool data right now.\n<i>{}</i>",
                html_escape(&e.to_string())
            )
        }
    }
}

/// Handle /pools: every configured pool
pub async fn handle_pools_command(bot: &Bot, chat_id: ChatId) -> Result<(), String> {
    let registry = get_registry();
    if registry.is_empty() {
        return send_html(
            bot,
            chat_id,
            "📊 No pools configured. Add entries to <code>pools_config.json</code>.",
            None,
        )
        .await
        .map(|_| ());
    }

    let loading_id = send_html(bot, chat_id, LOADING_TEXT, None).await?;
    let text = report_text("All pools", registry.all()).await?;
    let keyboard = menu_keyboard("pools:all", "menu:networks");
    show(bot, chat_id, Some(loading_id), &text, keyboard)
        .await
        .map(|_| ())
}

/// Report view reached from the menu
pub async fn show_report(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    selection: ReportSelection,
) -> Result<(), String> {
    let Some(resolved) = selection.resolve(get_registry()) else {
        logger::debug(
            LogTag::Telegram,
            &format!("Stale report selection {:?}", selection),
        );
        return super::menu::show_networks(bot, chat_id, message_id).await;
    };

    let loading_id = show(bot, chat_id, message_id, LOADING_TEXT, None).await?;
    let text = report_text(&resolved.title, &resolved.descriptors).await?;
    let keyboard = menu_keyboard(&resolved.refresh_data, &resolved.back_data);
    show(bot, chat_id, Some(loading_id), &text, keyboard)
        .await
        .map(|_| ())
}

fn menu_keyboard(refresh_data: &str, back_data: &str) -> Option<InlineKeyboardMarkup> {
    with_config(|cfg| cfg.telegram.menu_enabled)
        .then(|| keyboards::report_keyboard(refresh_data, back_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn registry() -> PoolRegistry {
        let pool = |chain: &str, symbol: &str| PoolDescriptor {
            chain: chain.to_string(),
            symbol: symbol.to_string(),
            ..PoolDescriptor::default()
        };
        PoolRegistry::new(vec![
            pool("Ethereum", "USDC"),
            pool("Ethereum", "DAI"),
            pool("Arbitrum", "USDC"),
        ])
    }

    #[test]
    fn test_resolve_group() {
        let resolved = ReportSelection::Group {
            network: 0,
            group: 1,
        }
        .resolve(&registry())
        .unwrap();

        assert_eq!(resolved.title, "Ethereum · DAI");
        assert_eq!(resolved.descriptors.len(), 1);
        assert_eq!(resolved.refresh_data, "grp:0:1");
        assert_eq!(resolved.back_data, "net:0");
    }

    #[test]
    fn test_resolve_network_and_all() {
        let registry = registry();
        let network = ReportSelection::Network(0).resolve(&registry).unwrap();
        assert_eq!(network.descriptors.len(), 2);
        assert_eq!(network.refresh_data, "grp:0:all");

        let all = ReportSelection::All.resolve(&registry).unwrap();
        assert_eq!(all.descriptors.len(), 3);
        assert_eq!(all.back_data, "menu:networks");
    }

    #[test]
    fn test_stale_indices() {
        let registry = registry();
        assert!(ReportSelection::Network(5).resolve(&registry).is_none());
        assert!(ReportSelection::Group {
            network: 1,
            group: 3
        }
        .resolve(&registry)
        .is_none());
    }

    #[tokio::test]
    async fn test_empty_selection_needs_no_network() {
        let text = report_text("Base", &[]).await.unwrap();
        assert!(text.contains("No pools configured"));
    }

    #[tokio::test]
    async fn test_unreachable_aggregator_gives_single_error_message() {
        let mut config = Config::default();
        config.defillama.pools_url = "http://127.0.0.1:1/pools".to_string();
        config.defillama.timeout_secs = 5;
        let manager = ApiManager::from_config(&config).unwrap();

        let descriptors = vec![PoolDescriptor {
            chain: "Ethereum".to_string(),
            project: "aave-v3".to_string(),
            symbol: "USDC".to_string(),
            user_comment: "Aave USDC".to_string(),
            ..PoolDescriptor::default()
        }];

        let text = pool_report_text("All pools", &descriptors, &manager, true).await;
        assert!(text.starts_with("❌ Could not fetch pool data right now."));
        assert!(!text.contains("Aave USDC"));

        let stats = manager.defillama.get_stats().await;
        assert_eq!(stats.failed_requests, 1);
    }
}
