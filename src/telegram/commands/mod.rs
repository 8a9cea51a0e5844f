//! Command router
//!
//! Every update runs on its own task (see `polling`). Handlers return
//! `Result<(), String>`; errors are logged by the router and never reach the
//! polling loop.

pub mod callbacks;
pub mod menu;
pub mod pools;
pub mod prices;
pub mod status;

use crate::config::with_config;
use crate::logger::{self, LogTag};
use crate::telegram::bot::bot_username;
use crate::telegram::formatters::{split_message, MAX_MESSAGE_LEN};
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardMarkup, LinkPreviewOptions, Message, MessageId, ParseMode, Update,
    UpdateKind,
};
use teloxide::utils::command::BotCommands;

/// Text shown while a report is fetched
pub const LOADING_TEXT: &str = "⏳ Loading…";

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "welcome message and main menu")]
    Start,
    #[command(description = "open the interactive menu")]
    Menu,
    #[command(description = "current BTC, ETH and CRV prices")]
    Prices,
    #[command(description = "APY and TVL of all tracked pools")]
    Pools,
    #[command(description = "uptime, pools loaded and API statistics")]
    Status,
    #[command(description = "show this help")]
    Help,
}

/// Help text listing every command
pub fn help_text() -> String {
    Command::descriptions().to_string()
}

/// Entry point for one update
pub async fn handle_update(bot: Bot, update: Update) {
    let result = match update.kind {
        UpdateKind::Message(message) => handle_message(&bot, message).await,
        UpdateKind::CallbackQuery(query) => callbacks::handle_callback_query(&bot, query).await,
        _ => {
            logger::verbose(LogTag::Telegram, "Ignoring unsupported update kind");
            Ok(())
        }
    };

    if let Err(e) = result {
        logger::warning(LogTag::Telegram, &format!("Update handling failed: {}", e));
    }
}

async fn handle_message(bot: &Bot, message: Message) -> Result<(), String> {
    let Some(text) = message.text() else {
        return Ok(());
    };
    let chat_id = message.chat.id;

    let username = bot_username();
    let command = match Command::parse(text, &username) {
        Ok(command) => command,
        Err(_) => {
            if text.starts_with('/') {
                logger::debug(
                    LogTag::Telegram,
                    &format!("Unknown command in chat {}: {}", chat_id, text),
                );
            }
            return Ok(());
        }
    };

    if !check_chat_allowed(chat_id) {
        logger::info(
            LogTag::Telegram,
            &format!("Ignoring {:?} from chat {} (not allowed)", command, chat_id),
        );
        return Ok(());
    }

    let (commands_enabled, menu_enabled) =
        with_config(|cfg| (cfg.telegram.commands_enabled, cfg.telegram.menu_enabled));

    logger::info(
        LogTag::Telegram,
        &format!("Command {:?} from chat {}", command, chat_id),
    );

    match command {
        Command::Start => menu::send_welcome(bot, chat_id, menu_enabled).await,
        Command::Help => send_html(bot, chat_id, &help_text(), None).await.map(|_| ()),
        Command::Menu if menu_enabled => menu::send_main_menu(bot, chat_id).await,
        Command::Prices if commands_enabled => prices::handle_prices_command(bot, chat_id).await,
        Command::Pools if commands_enabled => pools::handle_pools_command(bot, chat_id).await,
        Command::Status if commands_enabled => {
            let text = status::handle_status_command().await;
            send_html(bot, chat_id, &text, None).await.map(|_| ())
        }
        other => {
            logger::debug(
                LogTag::Telegram,
                &format!("{:?} is disabled in config", other),
            );
            Ok(())
        }
    }
}

/// Whether `chat_id` may use the bot (`telegram.allowed_chat_ids`)
pub fn check_chat_allowed(chat_id: ChatId) -> bool {
    with_config(|cfg| cfg.telegram.is_chat_allowed(chat_id.0))
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Send an HTML message, split when longer than Telegram allows; the
/// keyboard goes under the last part
pub async fn send_html(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<MessageId, String> {
    let chunks = split_message(text, MAX_MESSAGE_LEN);
    let last = chunks.len().saturating_sub(1);
    let mut last_id = None;

    for (i, chunk) in chunks.into_iter().enumerate() {
        let mut request = bot
            .send_message(chat_id, chunk)
            .parse_mode(ParseMode::Html)
            .link_preview_options(no_preview());
        if i == last {
            if let Some(keyboard) = keyboard.clone() {
                request = request.reply_markup(keyboard);
            }
        }
        let sent = request
            .await
            .map_err(|e| format!("Failed to send message: {}", e))?;
        last_id = Some(sent.id);
    }

    last_id.ok_or_else(|| "Nothing to send".to_string())
}

/// Replace the text of `message_id`; if editing fails (message too old,
/// deleted, or text too long) the content is sent as a new message.
/// Returns the id of the message now showing `text`.
pub async fn show(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<MessageId, String> {
    if let Some(message_id) = message_id {
        if text.len() <= MAX_MESSAGE_LEN {
            let mut request = bot
                .edit_message_text(chat_id, message_id, text)
                .parse_mode(ParseMode::Html)
                .link_preview_options(no_preview());
            if let Some(keyboard) = keyboard.clone() {
                request = request.reply_markup(keyboard);
            }

            match request.await {
                Ok(_) => return Ok(message_id),
                Err(e) => logger::debug(
                    LogTag::Telegram,
                    &format!("Edit failed, sending new message: {}", e),
                ),
            }
        } else {
            // The loading placeholder would stay behind otherwise
            if let Err(e) = bot.delete_message(chat_id, message_id).await {
                logger::debug(
                    LogTag::Telegram,
                    &format!("Could not delete placeholder message: {}", e),
                );
            }
        }
    }

    send_html(bot, chat_id, text, keyboard).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert!(matches!(
            Command::parse("/prices", "yieldwatch_bot"),
            Ok(Command::Prices)
        ));
        assert!(matches!(
            Command::parse("/pools@yieldwatch_bot", "yieldwatch_bot"),
            Ok(Command::Pools)
        ));
        assert!(Command::parse("/prices@other_bot", "yieldwatch_bot").is_err());
        assert!(Command::parse("/unknown", "yieldwatch_bot").is_err());
        assert!(Command::parse("hello", "yieldwatch_bot").is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for command in ["/start", "/menu", "/prices", "/pools", "/status", "/help"] {
            assert!(help.contains(command), "{} missing from help", command);
        }
    }

    #[tokio::test]
    async fn test_long_text_survives_failed_placeholder_delete() {
        let api_url = url::Url::parse("http://127.0.0.1:1/").unwrap();
        let bot = Bot::new("123:abc").set_api_url(api_url);
        let text = "a".repeat(MAX_MESSAGE_LEN + 10);

        let err = show(&bot, ChatId(1), Some(MessageId(7)), &text, None)
            .await
            .unwrap_err();
        assert!(err.contains("Failed to send message"));
    }
}
