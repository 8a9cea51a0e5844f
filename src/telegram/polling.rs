//! Long-polling update loop
//!
//! `getUpdates` with an offset; each update is handled on its own task so a
//! slow report never stalls the loop.

use crate::logger::{self, LogTag};
use crate::telegram::commands::handle_update;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::sync::Notify;
use tokio::task::JoinSet;

/// How long in-flight handlers get to finish after shutdown
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Repeat the poll-failure warning every this many consecutive failures
const POLL_WARN_EVERY: u32 = 30;

/// Poll until `shutdown` is notified, then wait briefly for in-flight handlers
pub async fn run_polling(bot: Bot, polling_timeout_secs: u32, shutdown: Arc<Notify>) {
    logger::info(LogTag::Telegram, "Update polling started");

    let mut offset: i32 = 0;
    let mut failures: u32 = 0;
    let mut handlers = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                logger::info(LogTag::Telegram, "Polling received shutdown signal");
                break;
            }
            result = poll_once(&bot, offset, polling_timeout_secs) => match result {
                Ok(updates) => {
                    if failures > 0 {
                        logger::info(
                            LogTag::Telegram,
                            &format!("Polling recovered after {} failed attempts", failures),
                        );
                        failures = 0;
                    }
                    for update in updates {
                        offset = offset.max(update.id.0 as i32 + 1);
                        handlers.spawn(handle_update(bot.clone(), update));
                    }
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let message = format!("Poll error #{} (will retry): {}", failures, e);
                    if should_warn(failures) {
                        logger::warning(LogTag::Telegram, &message);
                    } else {
                        logger::debug(LogTag::Telegram, &message);
                    }
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            },
        }

        // reap finished handlers
        while handlers.try_join_next().is_some() {}
    }

    if !handlers.is_empty() {
        logger::info(
            LogTag::Telegram,
            &format!("Waiting for {} in-flight handlers", handlers.len()),
        );
        let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
            while handlers.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            logger::warning(
                LogTag::Telegram,
                "Handlers did not finish within 5s, aborting them",
            );
            handlers.abort_all();
        }
    }

    logger::info(LogTag::Telegram, "Update polling stopped");
}

/// One getUpdates call
async fn poll_once(bot: &Bot, offset: i32, timeout_secs: u32) -> Result<Vec<Update>, String> {
    let mut request = bot.get_updates().timeout(timeout_secs);
    if offset > 0 {
        request = request.offset(offset);
    }
    request.await.map_err(|e| e.to_string())
}

/// Warn on the first failure of a streak and then periodically
fn should_warn(consecutive_failures: u32) -> bool {
    consecutive_failures == 1 || consecutive_failures % POLL_WARN_EVERY == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_failure_warnings_are_throttled() {
        assert!(should_warn(1));
        assert!(!should_warn(2));
        assert!(!should_warn(29));
        assert!(should_warn(30));
        assert!(should_warn(60));
        let warned = (1..=90).filter(|n| should_warn(*n)).count();
        assert_eq!(warned, 4);
    }
}
