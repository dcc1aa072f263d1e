//! Round store: every read and write of the `rounds` table.

use crate::db::db_utils::{parse_optional_ts_column, parse_ts_column, ts_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::Round;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

const ROUND_COLUMNS: &str = "id, start_time, end_time, working_group_id, created_at, updated_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Round> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;
    let created_raw: String = row.get("created_at")?;
    let updated_raw: String = row.get("updated_at")?;

    Ok(Round {
        id: row.get("id")?,
        start_time: parse_ts_column(&start_raw, 1)?,
        end_time: parse_optional_ts_column(end_raw, 2)?,
        // Orphans only exist until the default-group backfill runs.
        working_group_id: row.get::<_, Option<i64>>("working_group_id")?.unwrap_or(0),
        created_at: parse_ts_column(&created_raw, 4)?,
        updated_at: parse_ts_column(&updated_raw, 5)?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<Round>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_round(conn: &Connection, round_id: i64) -> AppResult<Option<Round>> {
    let round = conn
        .query_row(
            &format!("SELECT {ROUND_COLUMNS} FROM rounds WHERE id = ?1"),
            [round_id],
            map_row,
        )
        .optional()?;
    Ok(round)
}

/// The group's round without an end time. Should several exist, the most
/// recently started one wins.
pub fn find_open_round(conn: &Connection, group_id: i64) -> AppResult<Option<Round>> {
    let round = conn
        .query_row(
            &format!(
                "SELECT {ROUND_COLUMNS} FROM rounds
                 WHERE working_group_id = ?1 AND end_time IS NULL
                 ORDER BY start_time DESC, id DESC
                 LIMIT 1"
            ),
            [group_id],
            map_row,
        )
        .optional()?;
    Ok(round)
}

/// Most recently finished round of the group.
pub fn find_last_completed_round(conn: &Connection, group_id: i64) -> AppResult<Option<Round>> {
    let round = conn
        .query_row(
            &format!(
                "SELECT {ROUND_COLUMNS} FROM rounds
                 WHERE working_group_id = ?1 AND end_time IS NOT NULL
                 ORDER BY end_time DESC, id DESC
                 LIMIT 1"
            ),
            [group_id],
            map_row,
        )
        .optional()?;
    Ok(round)
}

/// Insert an open round.
///
/// A violation of the one-open-round index surfaces as the raw rusqlite
/// error; the lifecycle layer turns it into `AlreadyRunning`.
pub fn create_round(
    conn: &Connection,
    group_id: i64,
    start_time: DateTime<Utc>,
) -> AppResult<Round> {
    let now = ts_to_db(&Utc::now());
    conn.execute(
        "INSERT INTO rounds (start_time, end_time, working_group_id, created_at, updated_at)
         VALUES (?1, NULL, ?2, ?3, ?3)",
        params![ts_to_db(&start_time), group_id, now],
    )?;

    let id = conn.last_insert_rowid();
    find_round(conn, id)?.ok_or(AppError::RoundNotFound(id))
}

/// Set the end time of an open round. Completed rounds are immutable.
pub fn close_round(conn: &Connection, round_id: i64, end_time: DateTime<Utc>) -> AppResult<Round> {
    let changed = conn.execute(
        "UPDATE rounds SET end_time = ?1, updated_at = ?2
         WHERE id = ?3 AND end_time IS NULL",
        params![ts_to_db(&end_time), ts_to_db(&Utc::now()), round_id],
    )?;

    if changed == 0 {
        return match find_round(conn, round_id)? {
            Some(_) => Err(AppError::RoundAlreadyClosed(round_id)),
            None => Err(AppError::RoundNotFound(round_id)),
        };
    }

    find_round(conn, round_id)?.ok_or(AppError::RoundNotFound(round_id))
}

/// Rounds ordered by start time ascending, optionally limited to one group.
pub fn list_rounds(conn: &Connection, group_id: Option<i64>) -> AppResult<Vec<Round>> {
    match group_id {
        Some(id) => collect(
            conn,
            &format!(
                "SELECT {ROUND_COLUMNS} FROM rounds
                 WHERE working_group_id = ?1
                 ORDER BY start_time ASC, id ASC"
            ),
            [id],
        ),
        None => collect(
            conn,
            &format!("SELECT {ROUND_COLUMNS} FROM rounds ORDER BY start_time ASC, id ASC"),
            [],
        ),
    }
}

pub fn list_completed_rounds(conn: &Connection, group_id: i64) -> AppResult<Vec<Round>> {
    collect(
        conn,
        &format!(
            "SELECT {ROUND_COLUMNS} FROM rounds
             WHERE working_group_id = ?1 AND end_time IS NOT NULL
             ORDER BY start_time DESC, id DESC"
        ),
        [group_id],
    )
}

pub fn delete_rounds_for_group(conn: &Connection, group_id: i64) -> AppResult<usize> {
    let deleted = conn.execute("DELETE FROM rounds WHERE working_group_id = ?1", [group_id])?;
    Ok(deleted)
}

pub fn count_rounds_for_group(conn: &Connection, group_id: i64) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM rounds WHERE working_group_id = ?1",
        [group_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Attach rounds without a group (NULL or 0) to `group_id`.
pub fn backfill_orphan_rounds(conn: &Connection, group_id: i64) -> AppResult<usize> {
    let updated = conn.execute(
        "UPDATE rounds SET working_group_id = ?1
         WHERE working_group_id IS NULL OR working_group_id = 0",
        [group_id],
    )?;
    Ok(updated)
}
