//! Session record store: durable keyed storage for `Session` rows.
//!
//! Every write is a single statement or a single transaction, so a failed
//! operation leaves the stored session untouched.

use crate::core::calculator::{Computed, compute, earnings_for};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{NewSession, Session, SessionField};
use crate::ui::messages::warning;
use crate::utils::time::{TIMESTAMP_FORMAT, format_timestamp};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

const SELECT_SESSION: &str = "SELECT id, external_id, title, description, start_time, end_time,
        difference, hourly_rate, earnings, created_by
 FROM work_sessions";

/// Legacy rows may carry minute precision only.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Listing order for `DbPool::list_sessions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionOrder {
    /// Most recently finished first (ties: newest id first).
    #[default]
    EndTimeDesc,
    /// Chronological, used by exports.
    StartTimeAsc,
}

impl SessionOrder {
    fn sql(&self) -> &'static str {
        match self {
            SessionOrder::EndTimeDesc => "ORDER BY end_time DESC, id DESC",
            SessionOrder::StartTimeAsc => "ORDER BY start_time ASC, id ASC",
        }
    }
}

/// A single-field change together with the derived values it implies.
///
/// The variants for start, end and rate carry the recomputed derived fields,
/// so an input can never be written without them.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Title(String),
    Description(String),
    StartTime {
        start: NaiveDateTime,
        computed: Computed,
    },
    EndTime {
        end: NaiveDateTime,
        computed: Computed,
    },
    HourlyRate {
        rate: f64,
        earnings: f64,
    },
}

impl SessionUpdate {
    pub fn field(&self) -> SessionField {
        match self {
            SessionUpdate::Title(_) => SessionField::Title,
            SessionUpdate::Description(_) => SessionField::Description,
            SessionUpdate::StartTime { .. } => SessionField::StartTime,
            SessionUpdate::EndTime { .. } => SessionField::EndTime,
            SessionUpdate::HourlyRate { .. } => SessionField::HourlyRate,
        }
    }

    /// Apply the change to an in-memory copy, e.g. to preview an edit.
    pub fn apply_to(&self, session: &Session) -> Session {
        let mut out = session.clone();
        match self {
            SessionUpdate::Title(t) => out.title = t.clone(),
            SessionUpdate::Description(d) => out.description = d.clone(),
            SessionUpdate::StartTime { start, computed } => {
                out.start_time = *start;
                out.duration_secs = computed.duration_secs;
                out.earnings = computed.earnings;
            }
            SessionUpdate::EndTime { end, computed } => {
                out.end_time = *end;
                out.duration_secs = computed.duration_secs;
                out.earnings = computed.earnings;
            }
            SessionUpdate::HourlyRate { rate, earnings } => {
                out.hourly_rate = *rate;
                out.earnings = *earnings;
            }
        }
        out
    }

    /// Format and range checks that need no stored state.
    fn validate(&self) -> AppResult<()> {
        match self {
            SessionUpdate::Title(t) => validate_title(t),
            SessionUpdate::Description(_) => Ok(()),
            SessionUpdate::StartTime { computed, .. } | SessionUpdate::EndTime { computed, .. } => {
                if computed.duration_secs < 0 {
                    return Err(AppError::Validation(format!(
                        "duration cannot be negative ({}s)",
                        computed.duration_secs
                    )));
                }
                validate_amount("earnings", computed.earnings)
            }
            SessionUpdate::HourlyRate { rate, earnings } => {
                validate_amount("hourly rate", *rate)?;
                validate_amount("earnings", *earnings)
            }
        }
    }

    /// Reject derived values that do not match the stored sibling fields.
    fn check_against(&self, current: &Session) -> AppResult<()> {
        let consistent = match self {
            SessionUpdate::Title(_) | SessionUpdate::Description(_) => true,
            SessionUpdate::StartTime { start, computed } => {
                compute(*start, current.end_time, current.hourly_rate)? == *computed
            }
            SessionUpdate::EndTime { end, computed } => {
                compute(current.start_time, *end, current.hourly_rate)? == *computed
            }
            SessionUpdate::HourlyRate { rate, earnings } => {
                earnings_for(current.duration_secs, *rate) == *earnings
            }
        };

        if consistent {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "derived fields for {} edit of session {} are out of date",
                self.field().label(),
                current.id
            )))
        }
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    Ok(())
}

fn validate_amount(what: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{what} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn parse_stored_timestamp(raw: &str, col: usize) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                col,
                rusqlite::types::Type::Text,
                Box::new(AppError::Parse(format!("invalid stored timestamp '{}'", raw))),
            )
        })
}

pub(crate) fn map_row(row: &Row) -> rusqlite::Result<Session> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;

    let end_raw = end_raw.ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Null,
            Box::new(AppError::Validation("session has no end time".into())),
        )
    })?;

    Ok(Session {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        title: row.get("title")?,
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        start_time: parse_stored_timestamp(&start_raw, 4)?,
        end_time: parse_stored_timestamp(&end_raw, 5)?,
        duration_secs: row.get::<_, Option<i64>>("difference")?.unwrap_or(0),
        hourly_rate: row.get::<_, Option<f64>>("hourly_rate")?.unwrap_or(0.0),
        earnings: row.get::<_, Option<f64>>("earnings")?.unwrap_or(0.0),
        created_by: row.get("created_by")?,
    })
}

/// Load one session through any connection (plain or transaction).
fn fetch_session(conn: &Connection, id: i64) -> AppResult<Session> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_SESSION} WHERE id = ?1"))?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or(AppError::NotFound(id))
}

impl DbPool {
    /// Persist a new session and return its id.
    ///
    /// An `external_id` is generated when absent. The derived fields must match
    /// what the calculator yields for the given start, end and rate.
    pub fn create_session(&mut self, new: &NewSession) -> AppResult<i64> {
        validate_title(&new.title)?;
        validate_amount("hourly rate", new.hourly_rate)?;

        let expected = compute(new.start_time, new.end_time, new.hourly_rate)?;
        if expected.duration_secs != new.duration_secs || expected.earnings != new.earnings {
            return Err(AppError::Validation(format!(
                "derived fields do not match: expected {}s / {:.2}, got {}s / {:.2}",
                expected.duration_secs, expected.earnings, new.duration_secs, new.earnings
            )));
        }

        if new.created_by.trim().is_empty() {
            return Err(AppError::Validation("created_by must not be empty".into()));
        }

        let external_id = new
            .external_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.conn
            .execute(
                "INSERT INTO work_sessions
                    (external_id, title, description, start_time, end_time,
                     difference, hourly_rate, earnings, created_by)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    external_id,
                    new.title.trim(),
                    new.description.trim(),
                    format_timestamp(&new.start_time),
                    format_timestamp(&new.end_time),
                    new.duration_secs,
                    new.hourly_rate,
                    new.earnings,
                    new.created_by,
                ],
            )
            .map_err(AppError::from_write)?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_session(&self, id: i64) -> AppResult<Session> {
        fetch_session(&self.conn, id)
    }

    /// Snapshot of all finished sessions.
    ///
    /// Rows without an end time (still open, or left over by older releases)
    /// are skipped with a warning so one of them cannot hide the rest.
    pub fn list_sessions(&self, order: SessionOrder) -> AppResult<Vec<Session>> {
        let open: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM work_sessions WHERE end_time IS NULL",
            [],
            |row| row.get(0),
        )?;
        if open > 0 {
            warning(format!("Skipping {open} session(s) without an end time."));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_SESSION} WHERE end_time IS NOT NULL {}",
            order.sql()
        ))?;
        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Write one field (plus its derived fields) in a single transaction.
    pub fn update_field(&mut self, id: i64, update: &SessionUpdate) -> AppResult<()> {
        update.validate()?;

        let tx = self.conn.transaction()?;
        let current = fetch_session(&tx, id)?;
        update.check_against(&current)?;

        let changed = match update {
            SessionUpdate::Title(title) => tx.execute(
                "UPDATE work_sessions SET title = ?1 WHERE id = ?2",
                params![title.trim(), id],
            ),
            SessionUpdate::Description(desc) => tx.execute(
                "UPDATE work_sessions SET description = ?1 WHERE id = ?2",
                params![desc.trim(), id],
            ),
            SessionUpdate::StartTime { start, computed } => tx.execute(
                "UPDATE work_sessions
                 SET start_time = ?1, difference = ?2, earnings = ?3
                 WHERE id = ?4",
                params![
                    format_timestamp(start),
                    computed.duration_secs,
                    computed.earnings,
                    id
                ],
            ),
            SessionUpdate::EndTime { end, computed } => tx.execute(
                "UPDATE work_sessions
                 SET end_time = ?1, difference = ?2, earnings = ?3
                 WHERE id = ?4",
                params![
                    format_timestamp(end),
                    computed.duration_secs,
                    computed.earnings,
                    id
                ],
            ),
            SessionUpdate::HourlyRate { rate, earnings } => tx.execute(
                "UPDATE work_sessions SET hourly_rate = ?1, earnings = ?2 WHERE id = ?3",
                params![rate, earnings, id],
            ),
        }
        .map_err(AppError::from_write)?;

        if changed == 0 {
            return Err(AppError::NotFound(id));
        }

        tx.commit()?;
        Ok(())
    }

    /// Remove a session. Deleting a missing id is reported, not ignored.
    pub fn delete_session(&mut self, id: i64) -> AppResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM work_sessions WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    pub fn count_sessions(&self) -> AppResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM work_sessions", [], |row| row.get(0))?)
    }
}
