//! Telegram delivery module.
//!
//! [`Messenger`] is the transport seam, [`TelegramBot`] implements it via
//! teloxide and [`Notifier`] wraps any transport so that delivery failures
//! never reach the poll loop.

mod client;
mod notifier;

pub use client::{Messenger, TelegramBot, TelegramError};
pub use notifier::Notifier;
