//! Poll loop state.
//!
//! Owned by the driver and handed to every poll cycle. Nothing here
//! outlives the process.

use chrono::Utc;

use crate::tracker::StatusTracker;

/// Current time as a Unix timestamp in seconds.
#[must_use]
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// State carried from one poll cycle to the next.
#[derive(Debug, Default)]
pub struct PollState {
    /// Lower bound (`from_date`) for the next API query.
    pub cursor: i64,

    /// Last notified status per homework.
    pub tracker: StatusTracker,

    /// Most recent failure message, used to suppress repeats.
    pub last_error: Option<String>,
}

impl PollState {
    /// Creates a state whose cursor starts at `cursor`.
    #[must_use]
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Creates a state whose cursor starts at the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(now_unix())
    }

    /// Records a failure message.
    ///
    /// Returns `true` if it differs from the previous one and should be sent.
    /// The stored message is replaced either way.
    pub fn record_failure(&mut self, message: &str) -> bool {
        let is_new = self.last_error.as_deref() != Some(message);
        self.last_error = Some(message.to_owned());
        is_new
    }
}
