//! Repository layer
//!
//! Repositories abstract the two outbound channels of the bot: fetching the
//! review feed and delivering Telegram messages. They carry no business
//! logic.
//!
//! Both are trait-based to enable testing and mocking.

mod feed;
mod notifier;

// Re-export traits
pub use feed::StatusFeed;
pub use notifier::{Notifier, NotifyError};

// Re-export implementations
pub use feed::HttpStatusFeed;
pub use notifier::TelegramNotifier;
