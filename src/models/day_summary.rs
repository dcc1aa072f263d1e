use chrono::NaiveDate;
use serde::Serialize;

/// Today/overall seconds of a single working group.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct GroupTotals {
    pub today_seconds: i64,
    pub overall_seconds: i64,
}

/// Completed work of one group on one local calendar day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailySummary {
    pub group_id: i64,
    pub group_name: String,
    pub date: NaiveDate,        // serialized as YYYY-MM-DD
    pub date_display: String,   // e.g. "Monday, January 2, 2006"
    pub total_seconds: i64,
    pub total_formatted: String,
    pub round_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupTotal {
    pub group_id: i64,
    pub group_name: String,
    pub total_seconds: i64,
    pub total_formatted: String,
}
