use crate::db::db_utils::{ts_from_db, ts_to_db};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::{info, warn};

const ROUNDS_GROUP_COLUMN: &str = "20251020_0001_rounds_working_group";
const ROUNDS_TIMESTAMPS: &str = "20251020_0002_normalize_round_timestamps";
const ONE_OPEN_ROUND_INDEX: &str = "20251020_0003_one_open_round_per_group";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn index_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='index' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    info!(version, "{message}");
    Ok(())
}

fn create_working_groups_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS working_groups (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_rounds_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS rounds (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time        TEXT NOT NULL,
            end_time          TEXT,
            working_group_id  INTEGER REFERENCES working_groups(id),
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_round_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_rounds_group_start ON rounds(working_group_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_rounds_end_time ON rounds(end_time);
        "#,
    )?;
    Ok(())
}

/// Rounds recorded before working groups existed carry no group reference.
/// The column is added empty; `ensure_default_group` backfills it.
fn migrate_add_group_to_rounds(conn: &Connection) -> Result<()> {
    if has_column(conn, "rounds", "working_group_id")? {
        return Ok(());
    }

    warn!("legacy rounds table detected, adding working_group_id column");

    conn.execute(
        "ALTER TABLE rounds ADD COLUMN working_group_id INTEGER REFERENCES working_groups(id)",
        [],
    )?;

    mark_applied(
        conn,
        ROUNDS_GROUP_COLUMN,
        "Added working_group_id to rounds table",
    )
}

/// Legacy timestamps such as `2025-01-09 10:00:00.123+01:00` or naive UTC
/// `2025-01-09 09:00:00`.
fn parse_legacy_ts(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = ts_from_db(raw) {
        return Some(ts);
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|n| n.and_utc())
}

/// Rewrite every round timestamp into the canonical RFC 3339 form so that
/// text ordering stays chronological.
fn migrate_normalize_round_timestamps(conn: &Connection) -> Result<()> {
    if migration_applied(conn, ROUNDS_TIMESTAMPS)? {
        return Ok(());
    }

    type RawRow = (i64, String, Option<String>, String, String);
    let rows: Vec<RawRow> = {
        let mut stmt =
            conn.prepare("SELECT id, start_time, end_time, created_at, updated_at FROM rounds")?;
        let mapped = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?;
        let mut v = Vec::new();
        for r in mapped {
            v.push(r?);
        }
        v
    };

    let mut rewritten = 0usize;
    for (id, start_raw, end_raw, created_raw, updated_raw) in rows {
        let Some(start) = parse_legacy_ts(&start_raw) else {
            warn!(round_id = id, value = %start_raw, "unparseable start_time left untouched");
            continue;
        };
        let end = end_raw.as_deref().and_then(parse_legacy_ts);
        let created = parse_legacy_ts(&created_raw).unwrap_or(start);
        let updated = parse_legacy_ts(&updated_raw).unwrap_or(created);

        let start_s = ts_to_db(&start);
        let end_s = end.as_ref().map(ts_to_db);
        let created_s = ts_to_db(&created);
        let updated_s = ts_to_db(&updated);
        if start_s != start_raw
            || end_s != end_raw
            || created_s != created_raw
            || updated_s != updated_raw
        {
            conn.execute(
                "UPDATE rounds
                 SET start_time = ?1, end_time = ?2, created_at = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![start_s, end_s, created_s, updated_s, id],
            )?;
            rewritten += 1;
        }
    }

    mark_applied(
        conn,
        ROUNDS_TIMESTAMPS,
        &format!("Normalized timestamps of {rewritten} round(s)"),
    )
}

/// Partial unique index: at most one round without `end_time` per group.
///
/// Databases that already violate the invariant keep working without the
/// index; the lifecycle check still refuses a second start.
fn migrate_one_open_round_index(conn: &Connection) -> Result<()> {
    if index_exists(conn, "ux_rounds_one_open_per_group")? {
        return Ok(());
    }

    let duplicate: Option<Option<i64>> = conn
        .query_row(
            "SELECT working_group_id FROM rounds
             WHERE end_time IS NULL
             GROUP BY working_group_id
             HAVING COUNT(*) > 1
             LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(group) = duplicate {
        warn!(
            group_id = ?group,
            "several open rounds found for one group, unique open-round index not created"
        );
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_rounds_one_open_per_group
            ON rounds(working_group_id) WHERE end_time IS NULL;
        "#,
    )?;

    mark_applied(
        conn,
        ONE_OPEN_ROUND_INDEX,
        "Created unique index for open rounds",
    )
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_working_groups_table(conn)?;

    if table_exists(conn, "rounds")? {
        migrate_add_group_to_rounds(conn)?;
    } else {
        create_rounds_table(conn)?;
        // Nothing to normalize in a fresh table.
        mark_applied(conn, ROUNDS_TIMESTAMPS, "Created rounds table (modern schema)")?;
    }

    migrate_normalize_round_timestamps(conn)?;
    create_round_indexes(conn)?;
    migrate_one_open_round_index(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_timestamps_are_understood() {
        let a = parse_legacy_ts("2025-01-09 10:00:00.5+01:00").unwrap();
        assert_eq!(ts_to_db(&a), "2025-01-09T09:00:00.500000Z");
        let b = parse_legacy_ts("2025-01-09 09:00:00").unwrap();
        assert_eq!(ts_to_db(&b), "2025-01-09T09:00:00.000000Z");
        assert!(parse_legacy_ts("not a date").is_none());
    }

    #[test]
    fn migrations_are_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(index_exists(&conn, "ux_rounds_one_open_per_group").unwrap());
        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 2);
    }
}
