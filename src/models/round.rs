use super::round_status::RoundStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded work session.
///
/// `end_time == None` means the round is still in progress. Values of this
/// type are snapshots of a `rounds` row: mutating them does not touch the
/// database.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Round {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub working_group_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Round {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn status(&self) -> RoundStatus {
        if self.is_open() {
            RoundStatus::InProgress
        } else {
            RoundStatus::Completed
        }
    }

    /// Whole seconds between start and end, or between start and `now` for an
    /// open round. Truncated, never clamped: clock skew may yield a negative
    /// value.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_seconds()
    }

    /// Fractional minutes, as used by the CSV export.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_milliseconds() as f64 / 60_000.0
    }
}
