//! Time aggregation over rounds.
//!
//! Every function takes `now` (or a time zone) explicitly; the zone of `now`
//! decides where "today" starts. Open rounds count as running until `now`.
//! Durations are whole seconds, truncated, and summed without clamping.

use crate::db::pool::DbPool;
use crate::db::{groups, rounds};
use crate::errors::{AppError, AppResult};
use crate::models::{DailySummary, GroupTotal, GroupTotals, Round};
use crate::utils::date::{date_display, day_bounds};
use crate::utils::formatting::format_duration;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// Pure part of [`totals_for_group`].
pub fn sum_totals<Tz: TimeZone>(rounds: &[Round], now: &DateTime<Tz>) -> GroupTotals {
    let now_utc = now.with_timezone(&Utc);
    let (today_start, today_end) = day_bounds(now);
    let (today_start, today_end) = (
        today_start.with_timezone(&Utc),
        today_end.with_timezone(&Utc),
    );

    let mut totals = GroupTotals::default();
    for round in rounds {
        let seconds = round.elapsed_seconds(now_utc);
        totals.overall_seconds += seconds;
        // Bucketed by start only: a round crossing midnight is not split.
        if round.start_time >= today_start && round.start_time < today_end {
            totals.today_seconds += seconds;
        }
    }
    totals
}

pub fn totals_for_group<Tz: TimeZone>(
    pool: &DbPool,
    group_id: i64,
    now: &DateTime<Tz>,
) -> AppResult<GroupTotals> {
    let rounds = rounds::list_rounds(&pool.conn, Some(group_id))?;
    Ok(sum_totals(&rounds, now))
}

pub fn all_groups_total_seconds<Tz: TimeZone>(pool: &DbPool, now: &DateTime<Tz>) -> AppResult<i64> {
    let now_utc = now.with_timezone(&Utc);
    let rounds = rounds::list_rounds(&pool.conn, None)?;
    Ok(rounds.iter().map(|r| r.elapsed_seconds(now_utc)).sum())
}

/// Pure part of [`daily_summaries`]: open rounds are skipped, the rest is
/// bucketed by the local date of its start and returned newest day first.
pub fn summarize_days<Tz: TimeZone>(
    group_id: i64,
    group_name: &str,
    rounds: &[Round],
    tz: &Tz,
) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();

    for round in rounds {
        let Some(end) = round.end_time else {
            continue;
        };
        let day = round.start_time.with_timezone(tz).date_naive();
        let entry = by_day.entry(day).or_insert((0, 0));
        entry.0 += (end - round.start_time).num_seconds();
        entry.1 += 1;
    }

    let mut summaries: Vec<DailySummary> = by_day
        .into_iter()
        .map(|(date, (total_seconds, round_count))| DailySummary {
            group_id,
            group_name: group_name.to_string(),
            date,
            date_display: date_display(&date),
            total_seconds,
            total_formatted: format_duration(total_seconds),
            round_count,
        })
        .collect();

    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    summaries
}

pub fn daily_summaries<Tz: TimeZone>(
    pool: &DbPool,
    group_id: i64,
    tz: &Tz,
) -> AppResult<Vec<DailySummary>> {
    let group = groups::find_group(&pool.conn, group_id)?.ok_or(AppError::GroupNotFound(group_id))?;
    let completed = rounds::list_completed_rounds(&pool.conn, group_id)?;
    Ok(summarize_days(
        group.id,
        &group.display_name(),
        &completed,
        tz,
    ))
}

/// Overall seconds of every group, ordered by group name.
pub fn group_totals_summary<Tz: TimeZone>(
    pool: &DbPool,
    now: &DateTime<Tz>,
) -> AppResult<Vec<GroupTotal>> {
    let mut out = Vec::new();
    for group in groups::list_groups(&pool.conn)? {
        let totals = totals_for_group(pool, group.id, now)?;
        out.push(GroupTotal {
            group_id: group.id,
            group_name: group.display_name(),
            total_seconds: totals.overall_seconds,
            total_formatted: format_duration(totals.overall_seconds),
        });
    }
    Ok(out)
}
