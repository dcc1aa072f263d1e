//! Start/stop state machine of a working group.
//!
//! A group is *Idle* when it has no open round and *Active* when it has
//! exactly one. The state is never stored: it is whatever
//! `find_open_round` answers at the time of the call.

use crate::db::db_utils::is_unique_violation;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{groups, rounds};
use crate::errors::{AppError, AppResult};
use crate::models::{Round, WorkingGroup};
use crate::utils::formatting::{format_duration, format_timestamp};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    Active(Round),
}

impl RoundState {
    pub fn is_running(&self) -> bool {
        matches!(self, RoundState::Active(_))
    }
}

pub struct RoundLifecycle;

fn require_group(conn: &Connection, group_id: i64) -> AppResult<WorkingGroup> {
    groups::find_group(conn, group_id)?.ok_or(AppError::GroupNotFound(group_id))
}

impl RoundLifecycle {
    pub fn current_state(pool: &DbPool, group_id: i64) -> AppResult<RoundState> {
        require_group(&pool.conn, group_id)?;
        Ok(match rounds::find_open_round(&pool.conn, group_id)? {
            Some(round) => RoundState::Active(round),
            None => RoundState::Idle,
        })
    }

    pub fn start(pool: &mut DbPool, group_id: i64) -> AppResult<Round> {
        Self::start_at(pool, group_id, Utc::now())
    }

    /// Idle → Active. Fails with `AlreadyRunning` without touching the store
    /// when the group already has an open round.
    pub fn start_at(pool: &mut DbPool, group_id: i64, now: DateTime<Utc>) -> AppResult<Round> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let group = require_group(&tx, group_id)?;

        if rounds::find_open_round(&tx, group_id)?.is_some() {
            return Err(AppError::AlreadyRunning(group.display_name()));
        }

        let round = rounds::create_round(&tx, group_id, now).map_err(|e| match e {
            // Lost a race against another writer: the unique open-round index fired.
            AppError::Db(ref err) if is_unique_violation(err) => {
                AppError::AlreadyRunning(group.display_name())
            }
            other => other,
        })?;

        audit_quiet(
            &tx,
            "start",
            &group.name,
            &format!("Started round #{}", round.id),
        );
        tx.commit()?;

        info!(
            round_id = round.id,
            group = %group.name,
            "started round at {}",
            format_timestamp(&round.start_time)
        );
        Ok(round)
    }

    pub fn stop(pool: &mut DbPool, group_id: i64) -> AppResult<Round> {
        Self::stop_at(pool, group_id, Utc::now())
    }

    /// Active → Idle. Fails with `NotRunning` and mutates nothing when the
    /// group is idle.
    pub fn stop_at(pool: &mut DbPool, group_id: i64, now: DateTime<Utc>) -> AppResult<Round> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let group = require_group(&tx, group_id)?;

        let open = rounds::find_open_round(&tx, group_id)?
            .ok_or_else(|| AppError::NotRunning(group.display_name()))?;

        let round = rounds::close_round(&tx, open.id, now)?;
        let elapsed = round.elapsed_seconds(now);

        audit_quiet(
            &tx,
            "stop",
            &group.name,
            &format!(
                "Stopped round #{} (duration: {})",
                round.id,
                format_duration(elapsed)
            ),
        );
        tx.commit()?;

        info!(
            round_id = round.id,
            group = %group.name,
            duration = %format_duration(elapsed),
            "stopped round at {}",
            format_timestamp(&now)
        );
        Ok(round)
    }

    /// Drop the whole history of a group, open round included.
    pub fn reset(pool: &mut DbPool, group_id: i64) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;

        let group = require_group(&tx, group_id)?;
        let deleted = rounds::delete_rounds_for_group(&tx, group_id)?;

        audit_quiet(
            &tx,
            "reset",
            &group.name,
            &format!("Deleted {deleted} round(s)"),
        );
        tx.commit()?;

        info!(group = %group.name, deleted, "reset working group");
        Ok(deleted)
    }
}
