mod common;

use chrono::Duration;
use common::{memory_store, utc};
use workhours::core::{GroupRegistry, RoundLifecycle, RoundState};
use workhours::db::rounds;
use workhours::errors::{AppError, ErrorKind};

fn open_rounds(pool: &workhours::db::pool::DbPool, group_id: i64) -> usize {
    rounds::list_rounds(&pool.conn, Some(group_id))
        .unwrap()
        .iter()
        .filter(|r| r.is_open())
        .count()
}

#[test]
fn start_then_stop_completes_one_round() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    let started = RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    assert!(started.is_open());
    assert!(RoundLifecycle::current_state(&pool, g.id).unwrap().is_running());

    let stopped = RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::seconds(125)).unwrap();
    assert_eq!(stopped.id, started.id);
    assert_eq!(stopped.end_time, Some(t0 + Duration::seconds(125)));
    assert_eq!(
        RoundLifecycle::current_state(&pool, g.id).unwrap(),
        RoundState::Idle
    );
}

#[test]
fn double_start_is_rejected_and_keeps_one_open_round() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    let err = RoundLifecycle::start_at(&mut pool, g.id, t0 + Duration::seconds(5)).unwrap_err();

    assert!(matches!(err, AppError::AlreadyRunning(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(open_rounds(&pool, g.id), 1);
}

#[test]
fn stop_on_idle_group_mutates_nothing() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::minutes(1)).unwrap();
    let before = rounds::list_rounds(&pool.conn, Some(g.id)).unwrap();

    let err = RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::minutes(2)).unwrap_err();
    assert!(matches!(err, AppError::NotRunning(_)));

    let after = rounds::list_rounds(&pool.conn, Some(g.id)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn unknown_group_is_not_found() {
    let mut pool = memory_store();
    let err = RoundLifecycle::start(&mut pool, 999).unwrap_err();
    assert!(matches!(err, AppError::GroupNotFound(999)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn groups_run_independently() {
    let mut pool = memory_store();
    let a = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let b = GroupRegistry::create_group(&mut pool, "Support").unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, a.id, t0).unwrap();
    RoundLifecycle::start_at(&mut pool, b.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, a.id, t0 + Duration::minutes(3)).unwrap();

    assert!(!RoundLifecycle::current_state(&pool, a.id).unwrap().is_running());
    assert!(RoundLifecycle::current_state(&pool, b.id).unwrap().is_running());
}

#[test]
fn store_refuses_a_second_open_round() {
    let pool = memory_store();
    let g = workhours::db::groups::first_group_by_id(&pool.conn)
        .unwrap()
        .unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    rounds::create_round(&pool.conn, g.id, t0).unwrap();
    let err = rounds::create_round(&pool.conn, g.id, t0 + Duration::seconds(1)).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
}

#[test]
fn completed_rounds_cannot_be_closed_again() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    let round = RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::minutes(1)).unwrap();

    let err = rounds::close_round(&pool.conn, round.id, t0 + Duration::minutes(5)).unwrap_err();
    assert!(matches!(err, AppError::RoundAlreadyClosed(id) if id == round.id));
}

#[test]
fn reset_drops_every_round_of_the_group_only() {
    let mut pool = memory_store();
    let a = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let b = GroupRegistry::create_group(&mut pool, "Support").unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, a.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, a.id, t0 + Duration::minutes(1)).unwrap();
    RoundLifecycle::start_at(&mut pool, a.id, t0 + Duration::minutes(2)).unwrap();
    RoundLifecycle::start_at(&mut pool, b.id, t0).unwrap();

    assert_eq!(RoundLifecycle::reset(&mut pool, a.id).unwrap(), 2);
    assert!(rounds::list_rounds(&pool.conn, Some(a.id)).unwrap().is_empty());
    assert_eq!(rounds::list_rounds(&pool.conn, Some(b.id)).unwrap().len(), 1);
    assert!(!RoundLifecycle::current_state(&pool, a.id).unwrap().is_running());
}

#[test]
fn lifecycle_mutations_are_audited() {
    let mut pool = memory_store();
    let g = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    let t0 = utc(2025, 5, 6, 9, 0, 0);

    RoundLifecycle::start_at(&mut pool, g.id, t0).unwrap();
    RoundLifecycle::stop_at(&mut pool, g.id, t0 + Duration::minutes(1)).unwrap();

    let ops: Vec<String> = workhours::db::log::load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(ops.iter().any(|o| o == "start"));
    assert!(ops.iter().any(|o| o == "stop"));
}
