//! Configuration module for the homework notifier.
//!
//! Everything is read once from the process environment at startup.

mod settings;

pub use settings::{
    check_tokens, missing_vars, ConfigError, Credentials, PollSettings, REQUIRED_VARS,
};

/// Review API endpoint used when `ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between poll cycles, in seconds.
pub const DEFAULT_RETRY_TIME_SECS: u64 = 600;
