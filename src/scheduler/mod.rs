//! Homework poll loop module.
//!
//! Runs fetch, validation, status detection and notification on a fixed
//! interval, keeping all state in memory.

mod runner;
mod state;

pub use runner::{CycleOutcome, PollRunner};
pub use state::{PollState, now_unix};
