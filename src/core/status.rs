//! View models rendered by the transports: current status of a group and the
//! statistics page.

use crate::core::aggregate;
use crate::core::lifecycle::{RoundLifecycle, RoundState};
use crate::core::registry::GroupRegistry;
use crate::db::pool::DbPool;
use crate::db::rounds;
use crate::errors::AppResult;
use crate::models::{DailySummary, GroupTotal, WorkingGroup};
use crate::utils::formatting::{format_duration, format_timestamp};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

pub const NEVER: &str = "Never";
pub const IN_PROGRESS: &str = "In progress...";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupStatus {
    pub group_id: i64,
    pub group_name: String,
    pub is_running: bool,
    pub last_start_time: Option<DateTime<Utc>>,
    pub last_stop_time: Option<DateTime<Utc>>,
    pub last_start_str: String,
    pub last_stop_str: String,
    pub current_round_id: Option<i64>,
    pub total_today_seconds: i64,
    pub total_today_formatted: String,
    pub total_overall_seconds: i64,
    pub total_overall_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusContext {
    pub group_options: Vec<GroupOption>,
    pub selected_group_id: i64,
    pub state: GroupStatus,
    pub all_groups_total_seconds: i64,
    pub all_groups_total_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub group_options: Vec<GroupOption>,
    pub selected_group_id: i64,
    pub selected_group_name: String,
    pub daily_summaries: Vec<DailySummary>,
    pub group_totals: Vec<GroupTotal>,
    pub selected_group_today_formatted: String,
    pub selected_group_total_formatted: String,
    pub all_groups_total_formatted: String,
}

/// One line of the group management listing.
#[derive(Debug, Clone, Serialize)]
pub struct GroupOverview {
    pub id: i64,
    pub name: String,
    pub total_formatted: String,
    pub has_rounds: bool,
}

fn group_options(groups: &[WorkingGroup], selected: i64) -> Vec<GroupOption> {
    groups
        .iter()
        .map(|g| GroupOption {
            id: g.id,
            name: g.display_name(),
            selected: g.id == selected,
        })
        .collect()
}

pub fn group_status(
    pool: &DbPool,
    group: &WorkingGroup,
    now: &DateTime<Local>,
) -> AppResult<GroupStatus> {
    let totals = aggregate::totals_for_group(pool, group.id, now)?;

    let mut status = GroupStatus {
        group_id: group.id,
        group_name: group.display_name(),
        is_running: false,
        last_start_time: None,
        last_stop_time: None,
        last_start_str: NEVER.to_string(),
        last_stop_str: NEVER.to_string(),
        current_round_id: None,
        total_today_seconds: totals.today_seconds,
        total_today_formatted: format_duration(totals.today_seconds),
        total_overall_seconds: totals.overall_seconds,
        total_overall_formatted: format_duration(totals.overall_seconds),
    };

    match RoundLifecycle::current_state(pool, group.id)? {
        RoundState::Active(open) => {
            status.is_running = true;
            status.current_round_id = Some(open.id);
            status.last_start_time = Some(open.start_time);
            status.last_start_str = format_timestamp(&open.start_time);
            status.last_stop_str = IN_PROGRESS.to_string();
        }
        RoundState::Idle => {
            if let Some(last) = rounds::find_last_completed_round(&pool.conn, group.id)?
                && let Some(end) = last.end_time
            {
                status.last_start_time = Some(last.start_time);
                status.last_stop_time = Some(end);
                status.last_start_str = format_timestamp(&last.start_time);
                status.last_stop_str = format_timestamp(&end);
            }
        }
    }

    Ok(status)
}

pub fn build_status_context(
    pool: &mut DbPool,
    requested: Option<i64>,
    now: &DateTime<Local>,
) -> AppResult<StatusContext> {
    let selected = GroupRegistry::resolve_group(pool, requested)?;
    let groups = GroupRegistry::list_groups(pool)?;

    let state = group_status(pool, &selected, now)?;
    let all_total = aggregate::all_groups_total_seconds(pool, now)?;

    Ok(StatusContext {
        group_options: group_options(&groups, selected.id),
        selected_group_id: selected.id,
        state,
        all_groups_total_seconds: all_total,
        all_groups_total_formatted: format_duration(all_total),
    })
}

pub fn build_stats_view(
    pool: &mut DbPool,
    requested: Option<i64>,
    now: &DateTime<Local>,
) -> AppResult<StatsView> {
    let selected = GroupRegistry::resolve_group(pool, requested)?;
    let groups = GroupRegistry::list_groups(pool)?;

    let daily_summaries = aggregate::daily_summaries(pool, selected.id, &now.timezone())?;
    let group_totals = aggregate::group_totals_summary(pool, now)?;
    let totals = aggregate::totals_for_group(pool, selected.id, now)?;
    let all_total = aggregate::all_groups_total_seconds(pool, now)?;

    Ok(StatsView {
        group_options: group_options(&groups, selected.id),
        selected_group_id: selected.id,
        selected_group_name: selected.display_name(),
        daily_summaries,
        group_totals,
        selected_group_today_formatted: format_duration(totals.today_seconds),
        selected_group_total_formatted: format_duration(totals.overall_seconds),
        all_groups_total_formatted: format_duration(all_total),
    })
}

pub fn group_overviews(pool: &mut DbPool, now: &DateTime<Local>) -> AppResult<Vec<GroupOverview>> {
    let mut groups = GroupRegistry::list_groups(pool)?;
    if groups.is_empty() {
        groups.push(GroupRegistry::ensure_default_group(pool)?);
    }

    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let totals = aggregate::totals_for_group(pool, group.id, now)?;
        out.push(GroupOverview {
            id: group.id,
            name: group.display_name(),
            total_formatted: format_duration(totals.overall_seconds),
            has_rounds: rounds::count_rounds_for_group(&pool.conn, group.id)? > 0,
        });
    }
    Ok(out)
}
