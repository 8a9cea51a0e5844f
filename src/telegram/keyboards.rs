//! Inline keyboard builders
//!
//! Menu tree: main → networks → groups → report. Callback data carries
//! indices into the pool registry, which keeps it under Telegram's 64-byte
//! limit whatever the chain and group names are.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Telegram rejects callback data longer than this
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Buttons per row in generated lists
const BUTTONS_PER_ROW: usize = 2;

// === HELPER FUNCTIONS ===

/// Create a callback button
fn btn(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), callback_data.to_string())
}

fn rows_of(buttons: Vec<InlineKeyboardButton>) -> Vec<Vec<InlineKeyboardButton>> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Keep labels readable on narrow clients
fn label(text: &str) -> String {
    const MAX_LABEL_CHARS: usize = 24;
    if text.chars().count() <= MAX_LABEL_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{}…", truncated)
    }
}

// === MAIN MENU ===

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn("💰 Prices", "menu:prices"),
        btn("📊 Pools", "menu:networks"),
    ]])
}

/// Under the price board
pub fn prices_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn("🔄 Refresh", "menu:prices"),
        btn("◀️ Menu", "menu:main"),
    ]])
}

// === POOL NAVIGATION ===

/// One button per network (`net:<index>`), then All pools and Back
pub fn networks_menu(networks: &[String]) -> InlineKeyboardMarkup {
    let buttons = networks
        .iter()
        .enumerate()
        .map(|(i, network)| btn(&format!("🌐 {}", label(network)), &format!("net:{}", i)))
        .collect();

    let mut rows = rows_of(buttons);
    rows.push(vec![btn("📋 All pools", "pools:all")]);
    rows.push(vec![btn("◀️ Back", "menu:main")]);
    InlineKeyboardMarkup::new(rows)
}

/// One button per group of a network (`grp:<n>:<g>`), then All and Back
pub fn groups_menu(network_index: usize, network: &str, groups: &[String]) -> InlineKeyboardMarkup {
    let buttons = groups
        .iter()
        .enumerate()
        .map(|(g, group)| btn(&label(group), &format!("grp:{}:{}", network_index, g)))
        .collect();

    let mut rows = rows_of(buttons);
    rows.push(vec![btn(
        &format!("📋 All {}", label(network)),
        &format!("grp:{}:all", network_index),
    )]);
    rows.push(vec![btn("◀️ Networks", "menu:networks")]);
    InlineKeyboardMarkup::new(rows)
}

/// Under a report: refresh the same selection or go one level up
pub fn report_keyboard(refresh_data: &str, back_data: &str) -> InlineKeyboardMarkup {
    let back_label = if back_data == "menu:networks" {
        "◀️ Networks"
    } else {
        "◀️ Groups"
    };
    InlineKeyboardMarkup::new(vec![vec![
        btn("🔄 Refresh", refresh_data),
        btn(back_label, back_data),
    ]])
}

/// Shown when a stale button points past the current registry
pub fn back_to_main() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("◀️ Menu", "menu:main")]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_networks_menu_layout() {
        let networks = vec![
            "Ethereum".to_string(),
            "Arbitrum".to_string(),
            "Base".to_string(),
        ];
        let markup = networks_menu(&networks);

        // 3 networks in rows of 2, then All pools, then Back
        assert_eq!(markup.inline_keyboard.len(), 4);
        assert_eq!(
            callback_data(&markup),
            vec!["net:0", "net:1", "net:2", "pools:all", "menu:main"]
        );
    }

    #[test]
    fn test_groups_menu_callbacks() {
        let groups = vec!["USDC".to_string(), "DAI".to_string()];
        let data = callback_data(&groups_menu(3, "Ethereum", &groups));
        assert_eq!(data, vec!["grp:3:0", "grp:3:1", "grp:3:all", "menu:networks"]);
    }

    #[test]
    fn test_callback_data_fits_limit() {
        let long_name = "A".repeat(200);
        let groups: Vec<String> = (0..50).map(|i| format!("{}{}", long_name, i)).collect();
        let markup = groups_menu(usize::MAX, &long_name, &groups);

        for data in callback_data(&markup) {
            assert!(data.len() <= MAX_CALLBACK_DATA_LEN, "{} too long", data);
        }
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let text = label("Arbitrum Nova Long Network Name");
        assert_eq!(text.chars().count(), 24);
        assert!(text.ends_with('…'));
        assert_eq!(label("Base"), "Base");
    }
}
