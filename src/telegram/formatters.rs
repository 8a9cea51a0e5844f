//! HTML message formatting helpers

use num_format::{Locale, ToFormattedString};

/// Telegram's hard limit on message text
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Compact human-readable number
///
/// `None`/non-finite → `N/A`; ≥1e9 → `1.23B`; ≥1e6 → `1.23M`; ≥1e3 → `1.23K`;
/// below 0.01 in magnitude (but non-zero) → 4 decimals; otherwise 2 decimals
/// with thousands separators.
pub fn format_number(value: Option<f64>) -> String {
    let Some(x) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };

    if x >= 1e9 {
        format!("{:.2}B", x / 1e9)
    } else if x >= 1e6 {
        format!("{:.2}M", x / 1e6)
    } else if x >= 1e3 {
        format!("{:.2}K", x / 1e3)
    } else if x != 0.0 && x.abs() < 0.01 {
        format!("{:.4}", x)
    } else {
        with_separators(x)
    }
}

/// `$65,000.00`
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "N/A".to_string();
    }
    format!("${}", with_separators(price))
}

/// Percentage with the compact number rules
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{}%", format_number(Some(v))),
        None => "N/A".to_string(),
    }
}

/// Two decimals with thousands separators (`-1,234.50`)
fn with_separators(x: f64) -> String {
    let cents = (x.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_formatted_string(&Locale::en);
    let fraction = cents % 100;
    let sign = if x < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, whole, fraction)
}

/// Escape text for Telegram HTML parse mode
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `3d 4h 5m`, `4h 5m`, `5m 10s`, `10s`
pub fn format_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Split text into messages of at most `limit` bytes, preferring blank-line
/// then line boundaries
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for block in text.split("\n\n") {
        let separator = if current.is_empty() { "" } else { "\n\n" };
        if current.len() + separator.len() + block.len() <= limit {
            current.push_str(separator);
            current.push_str(block);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if block.len() <= limit {
            current.push_str(block);
        } else {
            for line in block.lines() {
                let separator = if current.is_empty() { "" } else { "\n" };
                if current.len() + separator.len() + line.len() > limit && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                if line.len() <= limit {
                    if !current.is_empty() {
                        current.push('\n');
                    }
                    current.push_str(line);
                } else {
                    let mut pieces = break_at_char_boundaries(line, limit);
                    current = pieces.pop().unwrap_or_default();
                    chunks.extend(pieces);
                }
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Cut an over-long line into pieces of at most `limit` bytes
fn break_at_char_boundaries(text: &str, limit: usize) -> Vec<String> {
    // A char is at most 4 bytes
    let limit = limit.max(4);
    let mut pieces = Vec::new();
    let mut rest = text;
    while rest.len() > limit {
        let mut end = limit;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        pieces.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    pieces.push(rest.to_string());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_suffixes() {
        assert_eq!(format_number(Some(1_234_567_890.0)), "1.23B");
        assert_eq!(format_number(Some(5_500_000.0)), "5.50M");
        assert_eq!(format_number(Some(1_000.0)), "1.00K");
        assert_eq!(format_number(Some(999.994)), "999.99");
    }

    #[test]
    fn test_format_number_small_and_missing() {
        assert_eq!(format_number(Some(0.00123)), "0.0012");
        assert_eq!(format_number(Some(-0.005)), "-0.0050");
        assert_eq!(format_number(Some(0.0)), "0.00");
        assert_eq!(format_number(Some(4.21)), "4.21");
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_number(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_negative_large_values_keep_separators() {
        assert_eq!(format_number(Some(-1_500_000.0)), "-1,500,000.00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(65_000.0), "$65,000.00");
        assert_eq!(format_price(0.4567), "$0.46");
        assert_eq!(format_price(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(3.5)), "3.50%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3_660), "1h 1m");
        assert_eq!(format_duration(90_061), "1d 1h 1m");
    }

    #[test]
    fn test_split_message_keeps_over_long_lines() {
        let text = format!("head\n{}", "x".repeat(25));
        let chunks = split_message(&text, 10);
        assert_eq!(
            chunks,
            vec![
                "head".to_string(),
                "x".repeat(10),
                "x".repeat(10),
                "x".repeat(5)
            ]
        );

        let long = "a".repeat(5005);
        let chunks = split_message(&long, MAX_MESSAGE_LEN);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.concat(), long);
    }

    #[test]
    fn test_split_message_respects_char_boundaries() {
        let text = "é".repeat(7);
        let chunks = split_message(&text, 5);
        assert!(chunks.iter().all(|c| c.len() <= 5));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_message() {
        assert_eq!(split_message("short", 100), vec!["short"]);

        let text = "aaaa\n\nbbbb\n\ncccc";
        assert_eq!(split_message(text, 10), vec!["aaaa\n\nbbbb", "cccc"]);

        let long_block = "line one\nline two\nline three";
        let chunks = split_message(long_block, 12);
        assert_eq!(chunks, vec!["line one", "line two", "line three"]);
        assert!(chunks.iter().all(|c| c.len() <= 12));
    }
}
