mod common;
use common::ts;
use tasktracker::core::calculator::{Computed, compute, earnings_for, round2};
use tasktracker::errors::AppError;

#[test]
fn full_working_day_at_twenty() {
    let c = compute(ts("2025-01-10 09:00:00"), ts("2025-01-10 17:00:00"), 20.0).unwrap();
    assert_eq!(
        c,
        Computed {
            duration_secs: 28800,
            earnings: 160.0
        }
    );
}

#[test]
fn zero_length_session_earns_nothing() {
    let t = ts("2025-01-10 09:00:00");
    let c = compute(t, t, 55.0).unwrap();
    assert_eq!(c.duration_secs, 0);
    assert_eq!(c.earnings, 0.0);
}

#[test]
fn zero_rate_keeps_duration() {
    let c = compute(ts("2025-01-10 09:00:00"), ts("2025-01-10 10:30:15"), 0.0).unwrap();
    assert_eq!(c.duration_secs, 5415);
    assert_eq!(c.earnings, 0.0);
}

#[test]
fn end_before_start_is_invalid_range() {
    let start = ts("2025-01-10 09:00:00");
    let end = ts("2025-01-10 08:59:59");
    let err = compute(start, end, 20.0).unwrap_err();
    match err {
        AppError::InvalidRange { start: s, end: e } => {
            assert_eq!(s, start);
            assert_eq!(e, end);
        }
        other => panic!("expected InvalidRange, got {other:?}"),
    }
}

#[test]
fn session_across_midnight() {
    let c = compute(ts("2025-01-10 22:00:00"), ts("2025-01-11 01:00:00"), 10.0).unwrap();
    assert_eq!(c.duration_secs, 3 * 3600);
    assert_eq!(c.earnings, 30.0);
}

#[test]
fn half_cent_rounds_away_from_zero() {
    // 450 s = 0.125 h, exactly representable: 12.5 cents
    assert_eq!(earnings_for(450, 1.0), 0.13);
    // 1350 s = 0.375 h: 37.5 cents
    assert_eq!(earnings_for(1350, 1.0), 0.38);
    assert_eq!(round2(-0.125), -0.13);
}

#[test]
fn earnings_are_rounded_to_cents() {
    // 1 s at 100/h = 0.02777…
    assert_eq!(earnings_for(1, 100.0), 0.03);
    // 20 min at 33.33/h = 11.11
    assert_eq!(earnings_for(1200, 33.33), 11.11);
}

#[test]
fn compute_is_deterministic() {
    let a = compute(ts("2025-03-01 08:12:07"), ts("2025-03-01 16:48:59"), 47.5).unwrap();
    let b = compute(ts("2025-03-01 08:12:07"), ts("2025-03-01 16:48:59"), 47.5).unwrap();
    assert_eq!(a, b);
    assert!(a.duration_secs >= 0);
}
