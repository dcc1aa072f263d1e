mod common;

use common::{memory_store, utc};
use rusqlite::Connection;
use workhours::core::registry::DEFAULT_GROUP_NAME;
use workhours::core::{GroupRegistry, RoundLifecycle};
use workhours::db::initialize::init_db;
use workhours::db::pool::DbPool;
use workhours::db::{groups, rounds};
use workhours::errors::{AppError, ErrorKind};

#[test]
fn default_group_bootstrap_is_idempotent() {
    let mut pool = DbPool::open_in_memory().unwrap();
    init_db(&pool.conn).unwrap();

    let first = GroupRegistry::ensure_default_group(&mut pool).unwrap();
    let second = GroupRegistry::ensure_default_group(&mut pool).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.name, DEFAULT_GROUP_NAME);
    assert_eq!(groups::count_groups(&pool.conn).unwrap(), 1);
}

#[test]
fn default_group_is_the_oldest_existing_group() {
    let mut pool = memory_store();
    let general = GroupRegistry::resolve_group(&mut pool, None).unwrap();
    GroupRegistry::create_group(&mut pool, "Alpha").unwrap();

    let g = GroupRegistry::ensure_default_group(&mut pool).unwrap();
    assert_eq!(g.id, general.id);
}

#[test]
fn names_are_validated_trimmed_and_unique() {
    let mut pool = memory_store();

    let err = GroupRegistry::create_group(&mut pool, "").unwrap_err();
    assert!(matches!(err, AppError::InvalidName));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let eng = GroupRegistry::create_group(&mut pool, " Eng ").unwrap();
    assert_eq!(eng.name, "Eng");

    let err = GroupRegistry::create_group(&mut pool, "Eng").unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(ref n) if n == "Eng"));
}

#[test]
fn rename_checks_other_groups_only() {
    let mut pool = memory_store();
    let eng = GroupRegistry::create_group(&mut pool, "Eng").unwrap();
    GroupRegistry::create_group(&mut pool, "Ops").unwrap();

    let same = GroupRegistry::rename_group(&mut pool, eng.id, "  Eng").unwrap();
    assert_eq!(same.name, "Eng");

    let err = GroupRegistry::rename_group(&mut pool, eng.id, "Ops").unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(_)));

    let renamed = GroupRegistry::rename_group(&mut pool, eng.id, "Platform").unwrap();
    assert_eq!(renamed.id, eng.id);
    assert_eq!(renamed.name, "Platform");

    let err = GroupRegistry::rename_group(&mut pool, 4242, "Nope").unwrap_err();
    assert!(matches!(err, AppError::GroupNotFound(4242)));
}

#[test]
fn the_last_group_cannot_be_deleted() {
    let mut pool = memory_store();
    let only = GroupRegistry::resolve_group(&mut pool, None).unwrap();

    let err = GroupRegistry::delete_group(&mut pool, only.id).unwrap_err();
    assert!(matches!(err, AppError::LastGroup));
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert_eq!(groups::count_groups(&pool.conn).unwrap(), 1);
}

#[test]
fn groups_with_rounds_cannot_be_deleted() {
    let mut pool = memory_store();
    let eng = GroupRegistry::create_group(&mut pool, "Eng").unwrap();
    RoundLifecycle::start_at(&mut pool, eng.id, utc(2025, 5, 6, 9, 0, 0)).unwrap();

    let err = GroupRegistry::delete_group(&mut pool, eng.id).unwrap_err();
    assert!(matches!(err, AppError::GroupHasRounds(1)));

    RoundLifecycle::reset(&mut pool, eng.id).unwrap();
    GroupRegistry::delete_group(&mut pool, eng.id).unwrap();
    assert!(groups::find_group(&pool.conn, eng.id).unwrap().is_none());
}

#[test]
fn deleting_an_unknown_group_is_not_found() {
    let mut pool = memory_store();
    let err = GroupRegistry::delete_group(&mut pool, 77).unwrap_err();
    assert!(matches!(err, AppError::GroupNotFound(77)));
}

#[test]
fn resolve_falls_back_to_first_group_by_name() {
    let mut pool = memory_store();
    let alpha = GroupRegistry::create_group(&mut pool, "Alpha").unwrap();
    let zulu = GroupRegistry::create_group(&mut pool, "Zulu").unwrap();

    assert_eq!(
        GroupRegistry::resolve_group(&mut pool, Some(zulu.id)).unwrap().id,
        zulu.id
    );
    assert_eq!(
        GroupRegistry::resolve_group(&mut pool, Some(9999)).unwrap().id,
        alpha.id
    );
    assert_eq!(GroupRegistry::resolve_group(&mut pool, None).unwrap().id, alpha.id);
}

#[test]
fn legacy_rounds_are_migrated_and_attached_to_the_default_group() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE rounds (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        INSERT INTO rounds (start_time, end_time, created_at, updated_at)
        VALUES ('2025-01-09 09:00:00', '2025-01-09 10:30:00',
                '2025-01-09 09:00:00', '2025-01-09 10:30:00');
        "#,
    )
    .unwrap();

    let mut pool = DbPool { conn };
    init_db(&pool.conn).unwrap();
    let general = GroupRegistry::ensure_default_group(&mut pool).unwrap();

    let migrated = rounds::list_rounds(&pool.conn, Some(general.id)).unwrap();
    assert_eq!(migrated.len(), 1);
    assert_eq!(migrated[0].start_time, utc(2025, 1, 9, 9, 0, 0));
    assert_eq!(migrated[0].end_time, Some(utc(2025, 1, 9, 10, 30, 0)));
}
