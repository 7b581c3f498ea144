//! Poll loop runner.
//!
//! Every cycle follows the same steps:
//! 1. Fetch updates newer than the cursor
//! 2. Validate the response shape
//! 3. Run status detection on every record, in order, sending each change
//!    as soon as it is detected
//! 4. Advance the cursor from `current_date`
//! 5. On failure, send the failure message unless it repeats the previous one
//!
//! The runner then sleeps for the retry interval whatever the outcome.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::state::{PollState, now_unix};
use crate::config::PollSettings;
use crate::error::PollError;
use crate::practicum::{PracticumClient, current_date, validate_response};
use crate::telegram::{Messenger, Notifier};
use crate::tracker::StatusChange;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle went through; `notified` status changes were reported.
    Completed { notified: usize },
    /// The cycle failed with `message`; `sent` tells whether it was delivered.
    Failed { message: String, sent: bool },
}

/// Drives poll cycles on a fixed interval.
pub struct PollRunner<M> {
    client: PracticumClient,
    notifier: Notifier<M>,
    settings: PollSettings,
}

impl<M: Messenger> PollRunner<M> {
    /// Creates a new runner.
    pub const fn new(
        client: PracticumClient,
        notifier: Notifier<M>,
        settings: PollSettings,
    ) -> Self {
        Self {
            client,
            notifier,
            settings,
        }
    }

    /// Runs poll cycles until the task is dropped.
    pub async fn run(&self, mut state: PollState) {
        info!(
            "Polling {} every {} seconds",
            self.client.endpoint(),
            self.settings.retry_time.as_secs()
        );

        loop {
            let outcome = self.poll_cycle(&mut state).await;
            debug!("Poll cycle finished: {:?}", outcome);
            sleep(self.settings.retry_time).await;
        }
    }

    /// Runs one poll cycle against `state`.
    pub async fn poll_cycle(&self, state: &mut PollState) -> CycleOutcome {
        match self.process(state).await {
            Ok(notified) => CycleOutcome::Completed { notified },
            Err(err) => {
                let message = err.user_message();
                let sent = if state.record_failure(&message) {
                    self.notifier.send(&message).await
                } else {
                    debug!("Suppressing repeated failure message: {}", message);
                    false
                };
                CycleOutcome::Failed { message, sent }
            }
        }
    }

    async fn process(&self, state: &mut PollState) -> Result<usize, PollError> {
        let response = self.client.fetch(state.cursor).await?;
        let homeworks = validate_response(&response)?;

        if homeworks.is_empty() {
            debug!("No homework updates since {}", state.cursor);
        }

        let mut notified = 0;
        for record in homeworks {
            match state.tracker.parse_status(record)? {
                StatusChange::Changed(message) => {
                    self.notifier.send(&message).await;
                    notified += 1;
                }
                StatusChange::Unchanged => {}
            }
        }

        self.advance_cursor(state, current_date(&response));
        Ok(notified)
    }

    fn advance_cursor(&self, state: &mut PollState, current_date: Option<i64>) {
        match current_date {
            Some(date) => state.cursor = date,
            None if self.settings.cursor_fallback_to_now => {
                state.cursor = now_unix();
                debug!("No current_date in response, cursor moved to {}", state.cursor);
            }
            None => warn!("No current_date in response, cursor stays at {}", state.cursor),
        }
    }
}

impl<M> std::fmt::Debug for PollRunner<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollRunner")
            .field("client", &self.client)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
