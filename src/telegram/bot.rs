//! Telegram bot instance management
//!
//! Builds the teloxide `Bot` with the configured timeouts, validates the
//! token and registers the command list.

use crate::config::TelegramConfig;
use crate::logger::{self, LogTag};
use crate::telegram::commands::Command;
use once_cell::sync::OnceCell;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// @username from getMe, used to parse `/cmd@username`
static BOT_USERNAME: OnceCell<String> = OnceCell::new();

pub fn bot_username() -> String {
    BOT_USERNAME.get().cloned().unwrap_or_default()
}

/// Create the bot, validate the token with getMe and register commands
pub async fn connect(config: &TelegramConfig) -> Result<Bot, String> {
    if config.bot_token.trim().is_empty() {
        return Err("No bot token configured (telegram.bot_token or TELEGRAM_BOT_TOKEN)".to_string());
    }

    let client = teloxide::net::default_reqwest_settings()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| format!("Failed to create Telegram HTTP client: {}", e))?;

    let bot = Bot::with_client(config.bot_token.trim(), client);

    let me = bot
        .get_me()
        .await
        .map_err(|e| format!("Invalid bot token: {}", e))?;
    let username = me.username.clone().unwrap_or_default();
    logger::info(
        LogTag::Telegram,
        &format!("Bot initialized: @{} (ID: {})", username, me.id),
    );
    let _ = BOT_USERNAME.set(username);

    if config.commands_enabled {
        match bot.set_my_commands(Command::bot_commands()).await {
            Ok(_) => logger::debug(LogTag::Telegram, "Command list registered"),
            Err(e) => logger::warning(
                LogTag::Telegram,
                &format!("Failed to register command list: {}", e),
            ),
        }
    }

    Ok(bot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_token() {
        let err = connect(&TelegramConfig::default()).await.unwrap_err();
        assert!(err.contains("No bot token"));
    }
}
