mod common;
use common::{memory_pool, record, ts};
use tasktracker::core::calculator::compute;
use tasktracker::db::{SessionOrder, SessionUpdate};
use tasktracker::errors::AppError;
use tasktracker::models::NewSession;

fn new_session(external_id: Option<&str>, title: &str) -> NewSession {
    let start = ts("2025-02-03 09:00:00");
    let end = ts("2025-02-03 11:00:00");
    let c = compute(start, end, 30.0).unwrap();
    NewSession {
        external_id: external_id.map(str::to_string),
        title: title.to_string(),
        description: "kickoff".into(),
        start_time: start,
        end_time: end,
        duration_secs: c.duration_secs,
        hourly_rate: 30.0,
        earnings: c.earnings,
        created_by: "test-device".into(),
    }
}

#[test]
fn create_then_get_returns_all_fields() {
    let mut pool = memory_pool();
    let id = pool.create_session(&new_session(None, "Kickoff")).unwrap();

    let s = pool.get_session(id).unwrap();
    assert_eq!(s.id, id);
    assert_eq!(s.title, "Kickoff");
    assert_eq!(s.description, "kickoff");
    assert_eq!(s.start_str(), "2025-02-03 09:00:00");
    assert_eq!(s.end_str(), "2025-02-03 11:00:00");
    assert_eq!(s.duration_secs, 7200);
    assert_eq!(s.hourly_rate, 30.0);
    assert_eq!(s.earnings, 60.0);
    assert_eq!(s.created_by, "test-device");
    assert_eq!(s.external_id.len(), 36, "generated UUID v4");
}

#[test]
fn get_is_idempotent() {
    let mut pool = memory_pool();
    let id = pool.create_session(&new_session(None, "Kickoff")).unwrap();
    assert_eq!(pool.get_session(id).unwrap(), pool.get_session(id).unwrap());
}

#[test]
fn get_missing_id_is_not_found() {
    let pool = memory_pool();
    assert!(matches!(pool.get_session(99), Err(AppError::NotFound(99))));
}

#[test]
fn duplicate_external_id_is_constraint_violation() {
    let mut pool = memory_pool();
    pool.create_session(&new_session(Some("fixed-id"), "First"))
        .unwrap();

    let err = pool
        .create_session(&new_session(Some("fixed-id"), "Second"))
        .unwrap_err();
    assert!(matches!(err, AppError::ConstraintViolation(_)), "{err:?}");
    assert_eq!(pool.count_sessions().unwrap(), 1);
}

#[test]
fn empty_title_is_rejected_without_write() {
    let mut pool = memory_pool();
    let err = pool.create_session(&new_session(None, "   ")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(pool.count_sessions().unwrap(), 0);
}

#[test]
fn inconsistent_derived_fields_are_rejected() {
    let mut pool = memory_pool();
    let mut s = new_session(None, "Kickoff");
    s.earnings = 999.0;

    assert!(matches!(
        pool.create_session(&s),
        Err(AppError::Validation(_))
    ));
    assert_eq!(pool.count_sessions().unwrap(), 0);
}

#[test]
fn end_before_start_cannot_be_stored() {
    let mut pool = memory_pool();
    let mut s = new_session(None, "Backwards");
    s.end_time = ts("2025-02-03 08:00:00");

    assert!(matches!(
        pool.create_session(&s),
        Err(AppError::InvalidRange { .. })
    ));
}

#[test]
fn empty_store_lists_nothing() {
    let pool = memory_pool();
    assert!(pool.list_sessions(SessionOrder::default()).unwrap().is_empty());
}

#[test]
fn list_orders_by_end_time_desc_then_id_desc() {
    let mut pool = memory_pool();
    let a = record(&mut pool, "A", "2025-01-01 09:00:00", "2025-01-01 10:00:00", 10.0);
    let b = record(&mut pool, "B", "2025-01-03 09:00:00", "2025-01-03 10:00:00", 10.0);
    let c = record(&mut pool, "C", "2025-01-02 08:00:00", "2025-01-03 10:00:00", 10.0);
    let d = record(&mut pool, "D", "2024-12-31 09:00:00", "2024-12-31 18:00:00", 10.0);

    let ids: Vec<i64> = pool
        .list_sessions(SessionOrder::EndTimeDesc)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(ids, vec![c.id, b.id, a.id, d.id]);

    let chronological: Vec<i64> = pool
        .list_sessions(SessionOrder::StartTimeAsc)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(chronological, vec![d.id, a.id, c.id, b.id]);
}

#[test]
fn delete_removes_and_repeated_delete_fails() {
    let mut pool = memory_pool();
    let s = record(&mut pool, "Gone", "2025-01-01 09:00:00", "2025-01-01 10:00:00", 10.0);

    pool.delete_session(s.id).unwrap();
    assert!(matches!(pool.get_session(s.id), Err(AppError::NotFound(_))));
    assert!(matches!(
        pool.delete_session(s.id),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn update_with_stale_derived_fields_is_rejected() {
    let mut pool = memory_pool();
    let s = record(&mut pool, "Task", "2025-01-10 09:00:00", "2025-01-10 17:00:00", 20.0);

    let stale = SessionUpdate::HourlyRate {
        rate: 25.0,
        earnings: 160.0,
    };
    assert!(matches!(
        pool.update_field(s.id, &stale),
        Err(AppError::Validation(_))
    ));
    assert_eq!(pool.get_session(s.id).unwrap(), s);
}

#[test]
fn update_of_missing_id_is_not_found() {
    let mut pool = memory_pool();
    let update = SessionUpdate::Title("New".into());
    assert!(matches!(
        pool.update_field(42, &update),
        Err(AppError::NotFound(42))
    ));
}

#[test]
fn update_writes_input_and_derived_fields_together() {
    let mut pool = memory_pool();
    let s = record(&mut pool, "Task", "2025-01-10 09:00:00", "2025-01-10 17:00:00", 20.0);

    let end = ts("2025-01-10 13:00:00");
    let update = SessionUpdate::EndTime {
        end,
        computed: compute(s.start_time, end, s.hourly_rate).unwrap(),
    };
    pool.update_field(s.id, &update).unwrap();

    let after = pool.get_session(s.id).unwrap();
    assert_eq!(after, update.apply_to(&s));
    assert_eq!(after.duration_secs, 4 * 3600);
    assert_eq!(after.earnings, 80.0);
}

#[test]
fn open_rows_do_not_break_listing() {
    let mut pool = memory_pool();
    let done = record(&mut pool, "Finished", "2025-01-01 09:00:00", "2025-01-01 10:00:00", 10.0);

    pool.conn
        .execute(
            "INSERT INTO work_sessions (external_id, title, start_time, end_time, created_by)
             VALUES ('open-row', 'Still running', '2025-01-02 09:00:00', NULL, 'test-device')",
            [],
        )
        .unwrap();

    for order in [SessionOrder::EndTimeDesc, SessionOrder::StartTimeAsc] {
        let listed = pool.list_sessions(order).unwrap();
        assert_eq!(listed, vec![done.clone()]);
    }
}
