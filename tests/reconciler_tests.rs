mod common;
use common::{memory_pool, record};
use tasktracker::core::del::DeleteLogic;
use tasktracker::core::edit::{EditLogic, EditOutcome, EditState, FieldEditor};
use tasktracker::core::reconciler::reconcile;
use tasktracker::db::SessionUpdate;
use tasktracker::errors::AppError;
use tasktracker::models::SessionField;

fn workday(pool: &mut tasktracker::db::DbPool) -> tasktracker::models::Session {
    record(pool, "Client X", "2025-01-10 09:00:00", "2025-01-10 17:00:00", 20.0)
}

#[test]
fn scenario_full_day_is_recorded_with_derived_fields() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);
    assert_eq!(s.duration_secs, 28800);
    assert_eq!(s.earnings, 160.0);
}

#[test]
fn scenario_rate_edit_recomputes_earnings_only() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let after = EditLogic::apply(&mut pool, s.id, SessionField::HourlyRate, "25.00").unwrap();
    assert_eq!(after.hourly_rate, 25.0);
    assert_eq!(after.earnings, 200.0);
    assert_eq!(after.duration_secs, 28800);
    assert_eq!(after.start_time, s.start_time);
    assert_eq!(after.end_time, s.end_time);
}

#[test]
fn scenario_end_edit_uses_stored_start_and_rate() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);
    EditLogic::apply(&mut pool, s.id, SessionField::HourlyRate, "25.00").unwrap();

    let after =
        EditLogic::apply(&mut pool, s.id, SessionField::EndTime, "2025-01-10 12:00:00").unwrap();
    assert_eq!(after.duration_secs, 10800);
    assert_eq!(after.earnings, 75.0);
    assert_eq!(after.hourly_rate, 25.0);
}

#[test]
fn scenario_end_before_start_leaves_session_unchanged() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let err = EditLogic::apply(&mut pool, s.id, SessionField::EndTime, "2025-01-10 08:00:00")
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
    assert_eq!(pool.get_session(s.id).unwrap(), s);
}

#[test]
fn scenario_delete_missing_id_is_not_found() {
    let mut pool = memory_pool();
    assert!(matches!(
        DeleteLogic::apply(&mut pool, 12345),
        Err(AppError::NotFound(12345))
    ));
}

#[test]
fn start_edit_uses_stored_end_and_rate() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let after =
        EditLogic::apply(&mut pool, s.id, SessionField::StartTime, "2025-01-10 13:00:00").unwrap();
    assert_eq!(after.duration_secs, 4 * 3600);
    assert_eq!(after.earnings, 80.0);
    assert_eq!(after.end_time, s.end_time);
}

#[test]
fn text_edits_do_not_touch_derived_fields() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let after = EditLogic::apply(&mut pool, s.id, SessionField::Title, "  Client Y ").unwrap();
    assert_eq!(after.title, "Client Y");
    let after =
        EditLogic::apply(&mut pool, s.id, SessionField::Description, "sprint review").unwrap();
    assert_eq!(after.description, "sprint review");

    assert_eq!(after.duration_secs, s.duration_secs);
    assert_eq!(after.earnings, s.earnings);
}

#[test]
fn bad_values_are_rejected_without_write() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    assert!(matches!(
        EditLogic::apply(&mut pool, s.id, SessionField::StartTime, "yesterday"),
        Err(AppError::Parse(_))
    ));
    assert!(matches!(
        EditLogic::apply(&mut pool, s.id, SessionField::HourlyRate, "-3"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        EditLogic::apply(&mut pool, s.id, SessionField::Title, "   "),
        Err(AppError::Validation(_))
    ));
    assert_eq!(pool.get_session(s.id).unwrap(), s);
}

#[test]
fn reconcile_rate_uses_stored_duration() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let update = reconcile(&s, SessionField::HourlyRate, "25,5").unwrap();
    assert_eq!(
        update,
        SessionUpdate::HourlyRate {
            rate: 25.5,
            earnings: 204.0
        }
    );
}

#[test]
fn editor_walks_through_states_and_commits() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    {
        let mut editor = FieldEditor::new(&mut pool);
        assert_eq!(editor.state(), &EditState::Idle);

        let before = editor.select(s.id, SessionField::HourlyRate).unwrap();
        assert_eq!(before, s);
        assert_eq!(
            editor.state(),
            &EditState::FieldSelected {
                id: s.id,
                field: SessionField::HourlyRate
            }
        );

        let preview = editor.propose("25").unwrap();
        assert_eq!(preview.earnings, 200.0);
        assert!(matches!(
            editor.state(),
            EditState::AwaitingConfirmation { .. }
        ));

        match editor.confirm().unwrap() {
            EditOutcome::Committed(after) => assert_eq!(after, preview),
            EditOutcome::Cancelled => panic!("expected a commit"),
        }
        assert_eq!(editor.state(), &EditState::Idle);
    }

    assert_eq!(pool.get_session(s.id).unwrap().earnings, 200.0);
}

#[test]
fn editor_cancel_discards_pending_value() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    {
        let mut editor = FieldEditor::new(&mut pool);
        editor.select(s.id, SessionField::EndTime).unwrap();
        editor.propose("2025-01-10 12:00:00").unwrap();

        assert_eq!(editor.cancel(), EditOutcome::Cancelled);
        assert_eq!(editor.state(), &EditState::Idle);
        assert!(matches!(editor.confirm(), Err(AppError::InvalidState(_))));
    }

    assert_eq!(pool.get_session(s.id).unwrap(), s);
}

#[test]
fn editor_keeps_field_selected_after_bad_value() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let mut editor = FieldEditor::new(&mut pool);
    editor.select(s.id, SessionField::EndTime).unwrap();

    assert!(editor.propose("2025-01-10 08:00:00").is_err());
    assert_eq!(
        editor.state(),
        &EditState::FieldSelected {
            id: s.id,
            field: SessionField::EndTime
        }
    );

    let preview = editor.propose("2025-01-10 12:00:00").unwrap();
    assert_eq!(preview.duration_secs, 10800);
}

#[test]
fn editor_rejects_out_of_order_calls() {
    let mut pool = memory_pool();
    let s = workday(&mut pool);

    let mut editor = FieldEditor::new(&mut pool);
    assert!(matches!(editor.propose("x"), Err(AppError::InvalidState(_))));
    assert!(matches!(editor.confirm(), Err(AppError::InvalidState(_))));

    editor.select(s.id, SessionField::Title).unwrap();
    assert!(matches!(
        editor.select(s.id, SessionField::Description),
        Err(AppError::InvalidState(_))
    ));
}

#[test]
fn editor_select_missing_session_stays_idle() {
    let mut pool = memory_pool();
    let mut editor = FieldEditor::new(&mut pool);

    assert!(matches!(
        editor.select(7, SessionField::Title),
        Err(AppError::NotFound(7))
    ));
    assert_eq!(editor.state(), &EditState::Idle);
}
