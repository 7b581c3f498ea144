//! Telegram Bot API transport.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use thiserror::Error;
use tracing::debug;

use crate::config::Credentials;

/// Errors that can occur while talking to Telegram.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Invalid Bot API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// Something able to deliver a text message to the configured chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `text` to the configured chat.
    async fn send_text(&self, text: &str) -> Result<(), TelegramError>;
}

/// Teloxide-based [`Messenger`] bound to a single chat.
pub struct TelegramBot {
    bot: teloxide::Bot,
    chat: Recipient,
}

impl TelegramBot {
    /// Creates a bot for the given token and destination chat.
    #[must_use]
    pub fn new(token: impl Into<String>, chat: Recipient) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
            chat,
        }
    }

    /// Creates a bot from loaded credentials, honouring `TELEGRAM_API_URL`.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, TelegramError> {
        let mut bot = Self::new(&credentials.telegram_token, credentials.recipient());

        if let Some(api_url) = &credentials.telegram_api_url {
            let url = reqwest::Url::parse(api_url)
                .map_err(|_| TelegramError::InvalidApiUrl(api_url.clone()))?;
            debug!("Using Bot API at {}", url);
            bot.bot = bot.bot.set_api_url(url);
        }

        Ok(bot)
    }
}

#[async_trait]
impl Messenger for TelegramBot {
    async fn send_text(&self, text: &str) -> Result<(), TelegramError> {
        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .map_err(|e| TelegramError::SendFailed(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::ChatId;

    use super::*;

    const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

    fn credentials(api_url: Option<String>) -> Credentials {
        Credentials {
            practicum_token: "p".to_owned(),
            telegram_token: TEST_BOT_TOKEN.to_owned(),
            chat_id: "123".to_owned(),
            endpoint: "http://localhost/api/".to_owned(),
            telegram_api_url: api_url,
        }
    }

    #[tokio::test]
    async fn test_send_text_hits_send_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{TEST_BOT_TOKEN}/sendMessage").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "message_id": 1,
                    "date": 1706529600,
                    "chat": {"id": 123, "type": "private"},
                    "from": {"id": 1, "is_bot": true, "first_name": "Bot", "username": "bot"},
                    "text": "hello"
                }
            }"#,
            )
            .create_async()
            .await;

        let bot = TelegramBot::from_credentials(&credentials(Some(server.url()))).unwrap();
        bot.send_text("hello").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_text_reports_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/bot{TEST_BOT_TOKEN}/sendMessage").as_str())
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let bot = TelegramBot::from_credentials(&credentials(Some(server.url()))).unwrap();
        let err = bot.send_text("hello").await.unwrap_err();

        assert!(matches!(err, TelegramError::SendFailed(_)));
    }

    #[test]
    fn test_new_bot_targets_chat() {
        let bot = TelegramBot::new(TEST_BOT_TOKEN, Recipient::Id(ChatId(42)));
        assert_eq!(bot.chat, Recipient::Id(ChatId(42)));
    }
}
