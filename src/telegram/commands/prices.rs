//! /prices and the Prices button

use super::{send_html, show, LOADING_TEXT};
use crate::apis::get_api_manager;
use crate::config::with_config;
use crate::prices::{fetch_price_board, render_price_board, render_price_error};
use crate::telegram::keyboards;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

/// Fetch and render the board; failures become the error text
pub async fn price_board_text() -> Result<String, String> {
    let manager = get_api_manager()?;
    let config = with_config(|cfg| cfg.prices.clone());

    Ok(match fetch_price_board(&manager, &config).await {
        Ok(board) => render_price_board(&board),
        Err(e) => render_price_error(&e),
    })
}

fn keyboard() -> Option<InlineKeyboardMarkup> {
    with_config(|cfg| cfg.telegram.menu_enabled).then(keyboards::prices_keyboard)
}

/// Handle /prices
pub async fn handle_prices_command(bot: &Bot, chat_id: ChatId) -> Result<(), String> {
    let loading_id = send_html(bot, chat_id, LOADING_TEXT, None).await?;
    let text = price_board_text().await?;
    show(bot, chat_id, Some(loading_id), &text, keyboard())
        .await
        .map(|_| ())
}

/// Prices button: the menu message turns into the board
pub async fn show_prices(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
) -> Result<(), String> {
    let loading_id = show(bot, chat_id, message_id, LOADING_TEXT, None).await?;
    let text = price_board_text().await?;
    show(bot, chat_id, Some(loading_id), &text, keyboard())
        .await
        .map(|_| ())
}
