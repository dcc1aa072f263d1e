// src/export/model.rs

use serde::Serialize;

/// Flat export row. Field names double as CSV headers.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RoundExport {
    #[serde(rename = "Round ID")]
    pub round_id: i64,
    #[serde(rename = "Working Group")]
    pub working_group: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Duration (minutes)")]
    pub duration_minutes: String,
    #[serde(rename = "Status")]
    pub status: String,
}
