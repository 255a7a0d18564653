use crate::core::calculator::compute;
use crate::core::timer::TimerRun;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::identity::DeviceId;
use crate::models::{NewSession, Session};
use crate::utils::time::{parse_rate, parse_timestamp, secs2readable};
use chrono::NaiveDateTime;

/// Everything needed to record a session before derived fields are known.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hourly_rate: f64,
}

/// High-level business logic for recording new sessions, either typed in
/// manually or captured by the live timer.
pub struct AddLogic;

impl AddLogic {
    /// Compute the derived fields, persist, and return the stored session.
    pub fn record(pool: &mut DbPool, device: &DeviceId, draft: &SessionDraft) -> AppResult<Session> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }

        let computed = compute(draft.start, draft.end, draft.hourly_rate)?;

        let id = pool.create_session(&NewSession {
            external_id: None,
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            start_time: draft.start,
            end_time: draft.end,
            duration_secs: computed.duration_secs,
            hourly_rate: draft.hourly_rate,
            earnings: computed.earnings,
            created_by: device.to_string(),
        })?;

        let session = pool.get_session(id)?;

        ttlog_soft(
            &pool.conn,
            "add",
            &format!("session {}", id),
            &format!(
                "'{}' {} → {} ({}, {:.2})",
                session.title,
                session.start_str(),
                session.end_str(),
                secs2readable(session.duration_secs),
                session.earnings
            ),
        );

        Ok(session)
    }

    /// Manual entry: every value arrives as text typed by the user.
    ///
    /// A missing rate falls back to `default_rate`, then to zero.
    #[allow(clippy::too_many_arguments)]
    pub fn manual(
        pool: &mut DbPool,
        device: &DeviceId,
        title: &str,
        description: Option<&str>,
        start: &str,
        end: &str,
        rate: Option<&str>,
        default_rate: Option<f64>,
    ) -> AppResult<Session> {
        let draft = SessionDraft {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            start: parse_timestamp(start)?,
            end: parse_timestamp(end)?,
            hourly_rate: resolve_rate(rate, default_rate)?,
        };

        Self::record(pool, device, &draft)
    }

    /// Persist the outcome of a live timer cycle.
    pub fn from_timer(
        pool: &mut DbPool,
        device: &DeviceId,
        run: &TimerRun,
        title: &str,
        description: &str,
        hourly_rate: f64,
    ) -> AppResult<Session> {
        let draft = SessionDraft {
            title: title.to_string(),
            description: description.to_string(),
            start: run.started_at,
            end: run.ended_at,
            hourly_rate,
        };

        Self::record(pool, device, &draft)
    }
}

/// Parse a typed rate, falling back to the configured default, then zero.
pub fn resolve_rate(rate: Option<&str>, default_rate: Option<f64>) -> AppResult<f64> {
    match rate.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => parse_rate(r),
        None => Ok(default_rate.unwrap_or(0.0)),
    }
}
