//! Credentials and poll settings.

use std::time::Duration;

use teloxide::types::{ChatId, Recipient};

use super::{DEFAULT_ENDPOINT, DEFAULT_RETRY_TIME_SECS};

/// Environment variables that must be present at startup.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Secrets the notifier needs for its whole lifetime.
#[derive(Clone)]
pub struct Credentials {
    /// Bearer token for the review API (`Authorization: OAuth ...`).
    pub practicum_token: String,

    /// Telegram bot token.
    pub telegram_token: String,

    /// Destination chat.
    pub chat_id: String,

    /// Review API endpoint.
    pub endpoint: String,

    /// Optional Bot API base URL override.
    pub telegram_api_url: Option<String>,
}

impl Credentials {
    /// Loads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the first missing required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnvVar(key))
        };

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let chat_id = required("TELEGRAM_CHAT_ID")?;

        let endpoint = lookup("ENDPOINT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        ensure_url("ENDPOINT", &endpoint)?;

        let telegram_api_url = lookup("TELEGRAM_API_URL").filter(|v| !v.is_empty());
        if let Some(url) = &telegram_api_url {
            ensure_url("TELEGRAM_API_URL", url)?;
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint,
            telegram_api_url,
        })
    }

    /// Telegram recipient for the configured chat id.
    ///
    /// Numeric ids address a chat directly, anything else is a channel username.
    #[must_use]
    pub fn recipient(&self) -> Recipient {
        match self.chat_id.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(self.chat_id.clone()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish_non_exhaustive()
    }
}

fn ensure_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.to_owned(),
        })
}

/// Lists the required variables absent from `lookup`, in declaration order.
pub fn missing_vars(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    REQUIRED_VARS
        .into_iter()
        .filter(|key| lookup(key).is_none_or(|v| v.is_empty()))
        .collect()
}

/// Checks that every required variable is set.
///
/// Each missing one is logged at critical severity. Returns `false` if the
/// notifier must not start.
pub fn check_tokens(lookup: impl Fn(&str) -> Option<String>) -> bool {
    let missing = missing_vars(lookup);
    for key in &missing {
        tracing::error!(
            severity = "critical",
            "Missing required environment variable: {}. Shutting down",
            key
        );
    }
    missing.is_empty()
}

/// Poll loop settings.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Pause between two poll cycles.
    pub retry_time: Duration,

    /// Move the cursor to the current time when the server omits `current_date`.
    pub cursor_fallback_to_now: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            retry_time: Duration::from_secs(DEFAULT_RETRY_TIME_SECS),
            cursor_fallback_to_now: false,
        }
    }
}

impl PollSettings {
    /// Creates poll settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates poll settings through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let retry_secs = lookup("RETRY_TIME")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_RETRY_TIME_SECS);

        let cursor_fallback_to_now = lookup("CURSOR_FALLBACK_TO_NOW")
            .is_some_and(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"));

        Self {
            retry_time: Duration::from_secs(retry_secs),
            cursor_fallback_to_now,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
