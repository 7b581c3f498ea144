//! Homework status change detection.

mod state;
mod status;

pub use state::{StatusChange, StatusTracker};
pub use status::HomeworkStatus;
