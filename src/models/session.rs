use crate::utils::time::{TIMESTAMP_FORMAT, format_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;

/// A persisted work session.
///
/// `duration_secs` and `earnings` are derived from `start_time`, `end_time` and
/// `hourly_rate`; they are only ever written together with their inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,                 // ⇔ work_sessions.id
    pub external_id: String,     // ⇔ work_sessions.external_id (UUID v4)
    pub title: String,           // ⇔ work_sessions.title
    pub description: String,     // ⇔ work_sessions.description ('' when NULL)
    #[serde(serialize_with = "ser_timestamp")]
    pub start_time: NaiveDateTime, // ⇔ work_sessions.start_time ("YYYY-MM-DD HH:MM:SS")
    #[serde(serialize_with = "ser_timestamp")]
    pub end_time: NaiveDateTime, // ⇔ work_sessions.end_time
    pub duration_secs: i64,      // ⇔ work_sessions.difference
    pub hourly_rate: f64,        // ⇔ work_sessions.hourly_rate
    pub earnings: f64,           // ⇔ work_sessions.earnings
    pub created_by: String,      // ⇔ work_sessions.created_by (device id)
}

impl Session {
    pub fn start_str(&self) -> String {
        format_timestamp(&self.start_time)
    }

    pub fn end_str(&self) -> String {
        format_timestamp(&self.end_time)
    }
}

/// Input for `DbPool::create_session`. Derived fields are computed by the
/// caller through the calculator; the store validates them again.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub external_id: Option<String>,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_secs: i64,
    pub hourly_rate: f64,
    pub earnings: f64,
    pub created_by: String,
}

fn ser_timestamp<S: serde::Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
}
