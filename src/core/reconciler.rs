//! Field-edit reconciler: turns a raw single-field edit into a `SessionUpdate`
//! whose derived fields agree with the session's other inputs.

use crate::core::calculator::{compute, earnings_for};
use crate::db::pool::DbPool;
use crate::db::sessions::SessionUpdate;
use crate::errors::{AppError, AppResult};
use crate::models::{Session, SessionField};
use crate::utils::time::{parse_rate, parse_timestamp};

/// Build the update for `field` given the session as currently stored.
///
/// - title / description: pass-through (title must stay non-empty)
/// - start / end: recompute duration and earnings against the stored
///   counterpart and rate
/// - rate: recompute earnings from the stored duration, timestamps untouched
pub fn reconcile(current: &Session, field: SessionField, raw: &str) -> AppResult<SessionUpdate> {
    match field {
        SessionField::Title => {
            let title = raw.trim();
            if title.is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
            Ok(SessionUpdate::Title(title.to_string()))
        }
        SessionField::Description => Ok(SessionUpdate::Description(raw.trim().to_string())),
        SessionField::StartTime => {
            let start = parse_timestamp(raw)?;
            let computed = compute(start, current.end_time, current.hourly_rate)?;
            Ok(SessionUpdate::StartTime { start, computed })
        }
        SessionField::EndTime => {
            let end = parse_timestamp(raw)?;
            let computed = compute(current.start_time, end, current.hourly_rate)?;
            Ok(SessionUpdate::EndTime { end, computed })
        }
        SessionField::HourlyRate => {
            let rate = parse_rate(raw)?;
            Ok(SessionUpdate::HourlyRate {
                rate,
                earnings: earnings_for(current.duration_secs, rate),
            })
        }
    }
}

/// Fetch the session's current state and reconcile the edit against it.
pub fn prepare(pool: &DbPool, id: i64, field: SessionField, raw: &str) -> AppResult<(Session, SessionUpdate)> {
    let current = pool.get_session(id)?;
    let update = reconcile(&current, field, raw)?;
    Ok((current, update))
}
