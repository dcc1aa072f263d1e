//! Formatting utilities used for CLI, HTTP and export outputs.

use chrono::{DateTime, Local, Utc};

/// Timestamp layout shared by status views and exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Seconds → `HH:MM:SS`. Negative values are shown as zero; hours are not
/// wrapped at 24.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// UTC instant rendered in local time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Minutes with two decimals, e.g. `2.08`.
pub fn format_minutes(minutes: f64) -> String {
    format!("{:.2}", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_durations_are_clamped() {
        assert_eq!(format_duration(-5), "00:00:00");
    }

    #[test]
    fn durations_are_split_into_hours_minutes_seconds() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(125), "00:02:05");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }

    #[test]
    fn minutes_keep_two_decimals() {
        assert_eq!(format_minutes(125.0 / 60.0), "2.08");
        assert_eq!(format_minutes(0.0), "0.00");
    }
}
