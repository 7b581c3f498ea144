//! Failure kinds of a single poll cycle.
//!
//! The `Display` text of each variant is the detail shown to the user in the
//! chat, so it is kept stable: two cycles failing for the same reason must
//! render the same text for duplicate suppression to work.

use thiserror::Error;

/// Everything that can make a poll cycle fail.
#[derive(Debug, Error)]
pub enum PollError {
    /// Transport-level failure: DNS, connect, reset, body read.
    ///
    /// `detail` is the whole source chain, so the root cause is not lost.
    #[error("Ошибка при запросе к основному API: {detail}")]
    Transport {
        detail: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-OK HTTP status.
    #[error("Эндпоинт {endpoint} недоступен. Код ответа API: {status}")]
    BadStatus { endpoint: String, status: u16 },

    /// The body is not valid JSON.
    #[error("Формат ответа API отличается от JSON")]
    Decode(#[source] serde_json::Error),

    #[error("Ответ API имеет тип данных, отличный от объекта")]
    NotAnObject,

    #[error("Ответ API не содержит ключ \"homeworks\"")]
    MissingHomeworks,

    #[error("Значение ключа \"homeworks\" не является списком")]
    HomeworksNotList,

    #[error("Работа в ответе API не содержит ключ \"homework_name\"")]
    MissingHomeworkName,

    /// Status outside of `approved` / `reviewing` / `rejected`.
    #[error("Статус работы {0} недопустим")]
    InvalidStatus(String),
}

impl PollError {
    /// Wraps a transport error, rendering its source chain into the detail.
    #[must_use]
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            detail: error_chain(&source),
            source,
        }
    }

    /// Text of the chat message reporting this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Сбой в работе программы: {self}")
    }
}

/// Renders an error and all of its sources as `outer: inner: root`.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] Middle);

    #[derive(Debug, Error)]
    #[error("client error (Connect)")]
    struct Middle(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_root_cause() {
        let err = Outer(Middle(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        )));
        assert_eq!(
            error_chain(&err),
            "error sending request: client error (Connect): Connection refused"
        );
    }

    #[test]
    fn test_error_chain_without_source() {
        let err = Middle(std::io::Error::other("reset"));
        assert_eq!(error_chain(&err.0), "reset");
    }

    #[test]
    fn test_user_message_prefix() {
        let err = PollError::MissingHomeworks;
        assert_eq!(
            err.user_message(),
            "Сбой в работе программы: Ответ API не содержит ключ \"homeworks\""
        );
    }

    #[test]
    fn test_bad_status_carries_code() {
        let err = PollError::BadStatus {
            endpoint: "http://localhost/api".to_owned(),
            status: 503,
        };
        let text = err.to_string();
        assert!(text.contains("http://localhost/api"));
        assert!(text.contains("503"));
    }

    #[test]
    fn test_invalid_status_text_is_stable() {
        let a = PollError::InvalidStatus("archived".to_owned()).user_message();
        let b = PollError::InvalidStatus("archived".to_owned()).user_message();
        assert_eq!(a, b);
    }
}
