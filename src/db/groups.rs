//! Working group store: every read and write of the `working_groups` table.

use crate::db::db_utils::{is_unique_violation, parse_ts_column, ts_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::WorkingGroup;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

const GROUP_COLUMNS: &str = "id, name, created_at, updated_at";

pub fn map_row(row: &Row) -> rusqlite::Result<WorkingGroup> {
    let created_raw: String = row.get("created_at")?;
    let updated_raw: String = row.get("updated_at")?;

    Ok(WorkingGroup {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: parse_ts_column(&created_raw, 2)?,
        updated_at: parse_ts_column(&updated_raw, 3)?,
    })
}

/// All groups ordered by name ascending.
pub fn list_groups(conn: &Connection) -> AppResult<Vec<WorkingGroup>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {GROUP_COLUMNS} FROM working_groups ORDER BY name ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_group(conn: &Connection, id: i64) -> AppResult<Option<WorkingGroup>> {
    let group = conn
        .query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM working_groups WHERE id = ?1"),
            [id],
            map_row,
        )
        .optional()?;
    Ok(group)
}

pub fn find_group_by_name(conn: &Connection, name: &str) -> AppResult<Option<WorkingGroup>> {
    let group = conn
        .query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM working_groups WHERE name = ?1"),
            [name],
            map_row,
        )
        .optional()?;
    Ok(group)
}

/// Oldest group, i.e. the one the default bootstrap would have created.
pub fn first_group_by_id(conn: &Connection) -> AppResult<Option<WorkingGroup>> {
    let group = conn
        .query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM working_groups ORDER BY id ASC LIMIT 1"),
            [],
            map_row,
        )
        .optional()?;
    Ok(group)
}

pub fn count_groups(conn: &Connection) -> AppResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM working_groups", [], |row| row.get(0))?;
    Ok(count)
}

/// Insert a group. `name` must already be validated.
pub fn insert_group(conn: &Connection, name: &str) -> AppResult<WorkingGroup> {
    let now = ts_to_db(&Utc::now());
    conn.execute(
        "INSERT INTO working_groups (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![name, now],
    )
    .map_err(|e| unique_to_duplicate(e, name))?;

    let id = conn.last_insert_rowid();
    find_group(conn, id)?.ok_or(AppError::GroupNotFound(id))
}

pub fn rename_group(conn: &Connection, id: i64, name: &str) -> AppResult<WorkingGroup> {
    let changed = conn
        .execute(
            "UPDATE working_groups SET name = ?1, updated_at = ?2 WHERE id = ?3",
            params![name, ts_to_db(&Utc::now()), id],
        )
        .map_err(|e| unique_to_duplicate(e, name))?;

    if changed == 0 {
        return Err(AppError::GroupNotFound(id));
    }
    find_group(conn, id)?.ok_or(AppError::GroupNotFound(id))
}

pub fn delete_group(conn: &Connection, id: i64) -> AppResult<()> {
    let deleted = conn.execute("DELETE FROM working_groups WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::GroupNotFound(id));
    }
    Ok(())
}

fn unique_to_duplicate(err: rusqlite::Error, name: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::DuplicateName(name.to_string())
    } else {
        AppError::Db(err)
    }
}
