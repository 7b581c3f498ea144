//! Fire-and-forget notification delivery.

use tracing::{error, info};

use super::Messenger;

/// Sends chat messages and swallows delivery failures.
///
/// A failed send is logged with the message text and dropped; it is neither
/// retried nor reported to the caller.
#[derive(Debug)]
pub struct Notifier<M> {
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    /// Wraps a messaging transport.
    pub const fn new(messenger: M) -> Self {
        Self { messenger }
    }

    /// Sends `message`, returning whether delivery succeeded.
    pub async fn send(&self, message: &str) -> bool {
        match self.messenger.send_text(message).await {
            Ok(()) => {
                info!("Bot sent message \"{}\"", message);
                true
            }
            Err(e) => {
                error!("Bot failed to send message \"{}\": {}", message, e);
                false
            }
        }
    }
}
