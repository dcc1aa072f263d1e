mod common;

use chrono::{Duration, Local, TimeZone, Utc};
use common::{memory_store, utc};
use workhours::core::aggregate::{
    all_groups_total_seconds, daily_summaries, group_totals_summary, totals_for_group,
};
use workhours::core::{GroupRegistry, RoundLifecycle};
use workhours::errors::AppError;

#[test]
fn one_round_of_125_seconds_yields_one_daily_summary() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::seconds(125)).unwrap();

    let days = daily_summaries(&pool, g.id, &Utc).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].total_seconds, 125);
    assert_eq!(days[0].total_formatted, "00:02:05");
    assert_eq!(days[0].round_count, 1);
    assert_eq!(days[0].date, t0.date_naive());
}

#[test]
fn completed_round_counts_today_only_when_it_started_today() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let yesterday = utc(2025, 5, 5, 9, 0, 0);
    let today = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, yesterday).unwrap();
    RoundLifecycle::stop_at(&mut pool, g.id, yesterday + Duration::seconds(600)).unwrap();
    RoundLifecycle::start_at(&mut pool, g.id, today).unwrap();
    RoundLifecycle::stop_at(&mut pool, g.id, today + Duration::milliseconds(90_900)).unwrap();

    let now = utc(2025, 5, 6, 12, 0, 0);
    let totals = totals_for_group(&pool, g.id, &now).unwrap();
    assert_eq!(totals.today_seconds, 90);
    assert_eq!(totals.overall_seconds, 690);
}

#[test]
fn all_groups_total_includes_open_rounds_up_to_now() {
    let mut pool = memory_store();
    let a = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let b = GroupRegistry::create_group(&mut pool, "Support").unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, a.id, t0).unwrap();
    let now = t0 + Duration::seconds(300);

    assert_eq!(all_groups_total_seconds(&pool, &now).unwrap(), 300);
    assert_eq!(totals_for_group(&pool, a.id, &now).unwrap().overall_seconds, 300);
    assert_eq!(totals_for_group(&pool, b.id, &now).unwrap().overall_seconds, 0);
}

#[test]
fn daily_summaries_ignore_open_rounds() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    RoundLifecycle::start_at(&mut pool, g.id, utc(2025, 5, 6, 9, 0, 0)).unwrap();

    assert!(daily_summaries(&pool, g.id, &Utc).unwrap().is_empty());
}

#[test]
fn daily_summaries_need_an_existing_group() {
    let pool = memory_store();
    let err = daily_summaries(&pool, 31337, &Local).unwrap_err();
    assert!(matches!(err, AppError::GroupNotFound(31337)));
}

#[test]
fn group_totals_are_listed_by_name() {
    let mut pool = memory_store();
    let zulu = GroupRegistry::create_group(&mut pool, "Zulu").unwrap();
    GroupRegistry::create_group(&mut pool, "Alpha").unwrap();
    let t0 = Utc.with_ymd_and_hms(2025, 5, 6, 9, 0, 0).unwrap();

    RoundLifecycle::start_at(&mut pool, zulu.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, zulu.id, t0 + Duration::hours(1)).unwrap();

    let totals = group_totals_summary(&pool, &(t0 + Duration::hours(2))).unwrap();
    let names: Vec<&str> = totals.iter().map(|t| t.group_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "General", "Zulu"]);
    assert_eq!(totals[2].total_formatted, "01:00:00");
}
