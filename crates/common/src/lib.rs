//! Shared types, config, and error definitions for the digest bot.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::BotConfig;
pub use error::Error;
pub use traits::{ForecastProvider, Mailer, QueueStore, SubscriberStore};
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
