//! Telegram front end
//!
//! ```text
//! telegram/
//! ├── mod.rs           # This file - public API
//! ├── bot.rs           # Bot creation, token check, command registration
//! ├── polling.rs       # getUpdates loop, one task per update
//! ├── keyboards.rs     # Inline keyboards
//! ├── formatters.rs    # Number and HTML formatting
//! └── commands/        # Command handlers
//!     ├── mod.rs       # Command router, send/edit helpers
//!     ├── menu.rs      # Main menu, networks, groups
//!     ├── prices.rs    # Price board
//!     ├── pools.rs     # Pool reports
//!     ├── status.rs    # /status
//!     └── callbacks.rs # Button click handlers
//! ```

pub mod bot;
pub mod commands;
pub mod formatters;
pub mod keyboards;
pub mod polling;

pub use bot::connect;
pub use commands::Command;
pub use formatters::{format_duration, format_number, format_price, html_escape};
pub use polling::run_polling;
