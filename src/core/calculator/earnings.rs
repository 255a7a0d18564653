use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

/// Derived values of a session: whole seconds worked and money earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computed {
    pub duration_secs: i64,
    pub earnings: f64,
}

/// Duration and earnings for `[start, end]` at `hourly_rate`.
///
/// Fails with `InvalidRange` when `end` precedes `start`. The duration is
/// floored to whole seconds and earnings are rounded to cents, half away
/// from zero.
pub fn compute(start: NaiveDateTime, end: NaiveDateTime, hourly_rate: f64) -> AppResult<Computed> {
    if end < start {
        return Err(AppError::InvalidRange { start, end });
    }

    let duration_secs = (end - start).num_seconds();

    Ok(Computed {
        duration_secs,
        earnings: earnings_for(duration_secs, hourly_rate),
    })
}

/// Earnings for an already known duration. Used when only the rate changes.
pub fn earnings_for(duration_secs: i64, hourly_rate: f64) -> f64 {
    round2(duration_secs as f64 / 3600.0 * hourly_rate)
}

/// Round to two decimals, half away from zero (`f64::round` semantics).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
