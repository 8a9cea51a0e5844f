//! Callback query handlers for inline keyboard buttons
//!
//! Handles button clicks from inline keyboards.

use super::check_chat_allowed;
use super::menu::{show_groups, show_main_menu, show_networks};
use super::pools::{show_report, ReportSelection};
use super::prices::show_prices;
use crate::config::with_config;
use crate::logger::{self, LogTag};
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

/// Parsed callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    MainMenu,
    Prices,
    Networks,
    Network(usize),
    Report(ReportSelection),
    Noop,
}

/// Parse `menu:main`, `net:<n>`, `grp:<n>:<g>`, `grp:<n>:all`, ...
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    let parts: Vec<&str> = data.split(':').collect();

    match parts.as_slice() {
        ["menu", "main"] => Some(CallbackAction::MainMenu),
        ["menu", "prices"] => Some(CallbackAction::Prices),
        ["menu", "networks"] => Some(CallbackAction::Networks),
        ["net", n] => n.parse().ok().map(CallbackAction::Network),
        ["grp", n, "all"] => n
            .parse()
            .ok()
            .map(|n| CallbackAction::Report(ReportSelection::Network(n))),
        ["grp", n, g] => {
            let network = n.parse().ok()?;
            let group = g.parse().ok()?;
            Some(CallbackAction::Report(ReportSelection::Group { network, group }))
        }
        ["pools", "all"] => Some(CallbackAction::Report(ReportSelection::All)),
        ["noop"] => Some(CallbackAction::Noop),
        _ => None,
    }
}

/// Handle callback query from inline keyboard button
pub async fn handle_callback_query(bot: &Bot, query: CallbackQuery) -> Result<(), String> {
    // Always answer callback query first to remove loading indicator
    bot.answer_callback_query(&query.id)
        .await
        .map_err(|e| format!("Failed to answer callback: {}", e))?;

    let Some(message) = query.message.as_ref() else {
        logger::debug(LogTag::Telegram, "Callback without message context");
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = Some(message.id());

    if !check_chat_allowed(chat_id) {
        logger::info(
            LogTag::Telegram,
            &format!("Ignoring callback from chat {} (not allowed)", chat_id),
        );
        return Ok(());
    }

    let data = query.data.as_deref().unwrap_or("");
    let Some(action) = parse_callback(data) else {
        logger::debug(LogTag::Telegram, &format!("Unknown callback: {}", data));
        return Ok(());
    };

    if !with_config(|cfg| cfg.telegram.menu_enabled) {
        logger::debug(
            LogTag::Telegram,
            &format!("Menu disabled, ignoring callback {}", data),
        );
        return Ok(());
    }

    logger::debug(
        LogTag::Telegram,
        &format!("Callback {:?} from chat {}", action, chat_id),
    );

    match action {
        CallbackAction::MainMenu => show_main_menu(bot, chat_id, message_id).await,
        CallbackAction::Prices => show_prices(bot, chat_id, message_id).await,
        CallbackAction::Networks => show_networks(bot, chat_id, message_id).await,
        CallbackAction::Network(n) => show_groups(bot, chat_id, message_id, n).await,
        CallbackAction::Report(selection) => show_report(bot, chat_id, message_id, selection).await,
        CallbackAction::Noop => Ok(()),
    }
}
