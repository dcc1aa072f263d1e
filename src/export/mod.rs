// src/export/mod.rs

pub mod csv;
pub(crate) mod fs_utils;
pub mod json;
mod model;

pub use model::RoundExport;

use crate::db::pool::DbPool;
use crate::db::{groups, rounds};
use crate::errors::AppResult;
use crate::models::working_group::display_name;
use crate::ui::messages::success;
use crate::utils::formatting::{format_minutes, format_timestamp};
use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::Path;

pub(crate) const HEADERS: [&str; 6] = [
    "Round ID",
    "Working Group",
    "Start Time",
    "End Time",
    "Duration (minutes)",
    "Status",
];

/// Shared completion message of the file exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Rows ordered by start time, optionally limited to one group. Open rounds
/// are measured up to `now`.
pub fn build_rows(
    pool: &DbPool,
    group_id: Option<i64>,
    now: DateTime<Utc>,
) -> AppResult<Vec<RoundExport>> {
    let names: HashMap<i64, String> = groups::list_groups(&pool.conn)?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();

    let rows = rounds::list_rounds(&pool.conn, group_id)?
        .into_iter()
        .map(|r| RoundExport {
            round_id: r.id,
            working_group: display_name(
                r.working_group_id,
                names.get(&r.working_group_id).map(String::as_str).unwrap_or(""),
            ),
            start_time: format_timestamp(&r.start_time),
            end_time: r.end_time.as_ref().map(format_timestamp).unwrap_or_default(),
            duration_minutes: format_minutes(r.elapsed_minutes(now)),
            status: r.status().as_str().to_string(),
        })
        .collect();

    Ok(rows)
}

/// `workinghours-<group>-<YYYY-MM-DD-HHMMSS>.<ext>`.
pub fn export_file_name(
    group_label: Option<&str>,
    format: ExportFormat,
    now: &DateTime<Local>,
) -> String {
    let label = group_label.unwrap_or("all-groups");
    format!(
        "workinghours-{}-{}.{}",
        label,
        now.format("%Y-%m-%d-%H%M%S"),
        format.as_str()
    )
}
