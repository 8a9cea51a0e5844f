//! Process-wide state that is not configuration

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};

/// When the process started; forced at startup so /status uptime is accurate
pub static STARTUP_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Set once the polling loop is running
static BOT_READY: AtomicBool = AtomicBool::new(false);

pub fn mark_startup() {
    Lazy::force(&STARTUP_TIME);
}

pub fn uptime_secs() -> u64 {
    (Utc::now() - *STARTUP_TIME).num_seconds().max(0) as u64
}

pub fn set_bot_ready(ready: bool) {
    BOT_READY.store(ready, Ordering::SeqCst);
}

pub fn is_bot_ready() -> bool {
    BOT_READY.load(Ordering::SeqCst)
}
