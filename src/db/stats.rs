use crate::db::db_utils::ts_from_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::format_timestamp;
use rusqlite::OptionalExtension;
use std::fs;

/// Raw numbers behind `db --info`.
#[derive(Debug, Clone, Default)]
pub struct DbInfo {
    pub groups: i64,
    pub rounds: i64,
    pub open_rounds: i64,
    pub first_start: Option<String>,
    pub last_start: Option<String>,
}

pub fn collect_db_info(pool: &DbPool) -> AppResult<DbInfo> {
    let conn = &pool.conn;

    let groups: i64 = conn.query_row("SELECT COUNT(*) FROM working_groups", [], |r| r.get(0))?;
    let rounds: i64 = conn.query_row("SELECT COUNT(*) FROM rounds", [], |r| r.get(0))?;
    let open_rounds: i64 = conn.query_row(
        "SELECT COUNT(*) FROM rounds WHERE end_time IS NULL",
        [],
        |r| r.get(0),
    )?;

    let first_start: Option<String> = conn
        .query_row(
            "SELECT start_time FROM rounds ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_start: Option<String> = conn
        .query_row(
            "SELECT start_time FROM rounds ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbInfo {
        groups,
        rounds,
        open_rounds,
        first_start,
        last_start,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let info = collect_db_info(pool)?;

    println!(
        "{}• Working groups:{} {}{}{}",
        CYAN, RESET, GREEN, info.groups, RESET
    );
    println!(
        "{}• Rounds:{} {}{}{} ({} in progress)",
        CYAN, RESET, GREEN, info.rounds, RESET, info.open_rounds
    );

    let fmt = |raw: &Option<String>| match raw {
        Some(s) => ts_from_db(s)
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_else(|_| s.clone()),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Round range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&info.first_start));
    println!("    to:   {}", fmt(&info.last_start));

    if let (Some(f), Some(l)) = (&info.first_start, &info.last_start)
        && let (Ok(first), Ok(last)) = (ts_from_db(f), ts_from_db(l))
    {
        let days = (last - first).num_days().max(1);
        let avg = info.rounds as f64 / days as f64;
        println!("{}• Average rounds/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
