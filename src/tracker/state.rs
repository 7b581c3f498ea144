//! In-memory tracking of the last notified status per homework.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, error};

use super::HomeworkStatus;
use crate::error::PollError;

/// Outcome of status detection for a single homework record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The status is new or differs from the stored one. Carries the chat message.
    Changed(String),
    /// Same status as last time; nothing to report.
    Unchanged,
}

/// Last notified status per homework name.
///
/// Names are never evicted; the map lives as long as the process.
#[derive(Debug, Default)]
pub struct StatusTracker {
    statuses: HashMap<String, HomeworkStatus>,
}

impl StatusTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked homeworks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether no homework has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Last notified status for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<HomeworkStatus> {
        self.statuses.get(name).copied()
    }

    /// Detects a status change for one homework record.
    ///
    /// On [`StatusChange::Changed`] the stored status is already updated, so
    /// a later record with the same name in the same batch compares against it.
    pub fn parse_status(&mut self, record: &Value) -> Result<StatusChange, PollError> {
        let raw_status = record.get("status").unwrap_or(&Value::Null);
        let Some(status) = HomeworkStatus::from_value(raw_status) else {
            let shown = raw_status
                .as_str()
                .map_or_else(|| raw_status.to_string(), str::to_owned);
            error!("Homework status {} is not allowed", shown);
            return Err(PollError::InvalidStatus(shown));
        };

        let Some(name) = record.get("homework_name").and_then(Value::as_str) else {
            error!("Homework record has no \"homework_name\": {}", record);
            return Err(PollError::MissingHomeworkName);
        };

        if self.statuses.get(name) == Some(&status) {
            debug!("Status of homework {} has not changed ({})", name, status);
            return Ok(StatusChange::Unchanged);
        }

        self.statuses.insert(name.to_owned(), status);
        Ok(StatusChange::Changed(format!(
            "Изменился статус проверки работы \"{name}\". {}",
            status.verdict()
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_status_is_reported() {
        let mut tracker = StatusTracker::new();
        let change = tracker
            .parse_status(&json!({"homework_name": "hw1", "status": "reviewing"}))
            .unwrap();

        assert_eq!(
            change,
            StatusChange::Changed(
                "Изменился статус проверки работы \"hw1\". Работа взята на проверку ревьюером."
                    .to_owned()
            )
        );
        assert_eq!(tracker.get("hw1"), Some(HomeworkStatus::Reviewing));
    }

    #[test]
    fn test_repeated_status_is_unchanged() {
        let mut tracker = StatusTracker::new();
        let record = json!({"homework_name": "hw1", "status": "approved"});

        assert!(matches!(
            tracker.parse_status(&record),
            Ok(StatusChange::Changed(_))
        ));
        assert_eq!(tracker.parse_status(&record).unwrap(), StatusChange::Unchanged);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_status_transition_is_reported() {
        let mut tracker = StatusTracker::new();
        tracker
            .parse_status(&json!({"homework_name": "hw1", "status": "reviewing"}))
            .unwrap();
        let change = tracker
            .parse_status(&json!({"homework_name": "hw1", "status": "rejected"}))
            .unwrap();

        let StatusChange::Changed(message) = change else {
            panic!("expected a change");
        };
        assert!(message.ends_with(HomeworkStatus::Rejected.verdict()));
        assert_eq!(tracker.get("hw1"), Some(HomeworkStatus::Rejected));
    }

    #[test]
    fn test_names_are_tracked_independently() {
        let mut tracker = StatusTracker::new();
        for name in ["hw1", "hw2"] {
            let change = tracker
                .parse_status(&json!({"homework_name": name, "status": "approved"}))
                .unwrap();
            assert!(matches!(change, StatusChange::Changed(_)));
        }
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_invalid_status_is_a_failure() {
        let mut tracker = StatusTracker::new();
        let err = tracker
            .parse_status(&json!({"homework_name": "hw1", "status": "archived"}))
            .unwrap_err();

        assert!(matches!(err, PollError::InvalidStatus(ref s) if s == "archived"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_missing_status_is_a_failure() {
        let mut tracker = StatusTracker::new();
        let err = tracker
            .parse_status(&json!({"homework_name": "hw1"}))
            .unwrap_err();
        assert!(matches!(err, PollError::InvalidStatus(ref s) if s == "null"));
    }

    #[test]
    fn test_missing_name_is_a_failure() {
        let mut tracker = StatusTracker::new();
        let err = tracker
            .parse_status(&json!({"status": "approved"}))
            .unwrap_err();
        assert!(matches!(err, PollError::MissingHomeworkName));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut tracker = StatusTracker::new();
        let change = tracker
            .parse_status(&json!({
                "id": 42,
                "homework_name": "hw1",
                "status": "approved",
                "reviewer_comment": "ok",
                "lesson_name": "intro"
            }))
            .unwrap();
        assert!(matches!(change, StatusChange::Changed(_)));
    }
}
