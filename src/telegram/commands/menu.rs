//! Menu command handlers
//!
//! Handles the interactive menu and navigation.

use super::{send_html, show};
use crate::logger::{self, LogTag};
use crate::pools::get_registry;
use crate::telegram::formatters::html_escape;
use crate::telegram::keyboards;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};

const MAIN_MENU_TEXT: &str = "🤖 <b>YieldWatch</b>\n\n\
    Check spot prices or browse the tracked pools by network.";

const NO_POOLS_TEXT: &str = "📊 <b>Pools</b>\n\n\
    No pools configured. Add entries to <code>pools_config.json</code> and restart the bot.";

/// Handle /start
pub async fn send_welcome(bot: &Bot, chat_id: ChatId, menu_enabled: bool) -> Result<(), String> {
    let mut text = String::from(
        "👋 <b>Welcome to YieldWatch</b>\n\n\
         I report spot prices and the APY/TVL of the pools you track.\n\n\
         /prices - current prices\n\
         /pools - all tracked pools\n\
         /help - every command",
    );

    if menu_enabled {
        text.push_str("\n\nOr pick from the menu below.");
        send_html(bot, chat_id, &text, Some(keyboards::main_menu())).await?;
    } else {
        send_html(bot, chat_id, &text, None).await?;
    }
    Ok(())
}

/// Handle /menu
pub async fn send_main_menu(bot: &Bot, chat_id: ChatId) -> Result<(), String> {
    show_main_menu(bot, chat_id, None).await
}

pub async fn show_main_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
) -> Result<(), String> {
    show(bot, chat_id, message_id, MAIN_MENU_TEXT, Some(keyboards::main_menu()))
        .await
        .map(|_| ())
}

/// Network list
pub async fn show_networks(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
) -> Result<(), String> {
    let registry = get_registry();
    if registry.is_empty() {
        return show(
            bot,
            chat_id,
            message_id,
            NO_POOLS_TEXT,
            Some(keyboards::back_to_main()),
        )
        .await
        .map(|_| ());
    }

    let networks = registry.networks();
    let text = format!(
        "📊 <b>Pools</b>\n\n{} pools on {} networks. Choose a network:",
        registry.len(),
        networks.len()
    );
    show(
        bot,
        chat_id,
        message_id,
        &text,
        Some(keyboards::networks_menu(&networks)),
    )
    .await
    .map(|_| ())
}

/// Group list of one network
pub async fn show_groups(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    network_index: usize,
) -> Result<(), String> {
    let registry = get_registry();
    let Some(network) = registry.network_at(network_index) else {
        logger::debug(
            LogTag::Telegram,
            &format!("Stale network index {}", network_index),
        );
        return show_networks(bot, chat_id, message_id).await;
    };

    let groups = registry.groups(&network);
    let text = format!(
        "🌐 <b>{}</b>\n\n{} pools. Choose a ticker group:",
        html_escape(&network),
        registry.select(&network, None).len()
    );
    show(
        bot,
        chat_id,
        message_id,
        &text,
        Some(keyboards::groups_menu(network_index, &network, &groups)),
    )
    .await
    .map(|_| ())
}
