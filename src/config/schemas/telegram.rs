//! Telegram bot configuration

use crate::config_struct;

config_struct! {
    /// Telegram bot connection and command settings
    pub struct TelegramConfig {
        /// Bot token from @BotFather (TELEGRAM_BOT_TOKEN overrides it)
        bot_token: String = String::new(),

        /// Answer /prices, /pools and the other commands
        commands_enabled: bool = true,

        /// Offer the inline network/group menu
        menu_enabled: bool = true,

        /// Chats allowed to use the bot (empty = everyone)
        allowed_chat_ids: Vec<i64> = Vec::new(),

        /// TCP connect timeout for Bot API requests
        connect_timeout_secs: u64 = 30,

        /// Overall timeout for Bot API requests (must exceed the polling timeout)
        request_timeout_secs: u64 = 30,

        /// Long-polling timeout passed to getUpdates
        polling_timeout_secs: u64 = 10,
    }
}

impl TelegramConfig {
    /// Whether a chat may use the bot
    pub fn is_chat_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chat_ids.is_empty() || self.allowed_chat_ids.contains(&chat_id)
    }
}
