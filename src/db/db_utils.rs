//! Shared helpers for the store modules: timestamp codec and error probes.

use crate::errors::AppError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::ffi;

/// RFC 3339, UTC, fixed microsecond precision: lexical order equals
/// chronological order, so `ORDER BY start_time` works on the TEXT column.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn ts_from_db(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
}

/// Row-mapping flavour of [`ts_from_db`], for use inside `query_map`.
pub fn parse_ts_column(raw: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    ts_from_db(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn parse_optional_ts_column(
    raw: Option<String>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match raw {
        Some(s) => parse_ts_column(&s, idx).map(Some),
        None => Ok(None),
    }
}

/// True for `UNIQUE` violations (including unique partial indexes).
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_keep_microseconds_and_sort_lexically() {
        let a = Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let (sa, sb) = (ts_to_db(&a), ts_to_db(&b));
        assert_eq!(sa, "2025-01-09T23:59:59.000000Z");
        assert!(sa < sb);
        assert_eq!(ts_from_db(&sa).unwrap(), a);
    }

    #[test]
    fn garbage_timestamps_are_rejected() {
        assert!(matches!(
            ts_from_db("yesterday"),
            Err(AppError::InvalidTimestamp(_))
        ));
    }
}
