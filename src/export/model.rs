// src/export/model.rs

use crate::export::range::ExportWindow;
use crate::models::Session;
use crate::utils::time::secs2readable;
use serde::Serialize;

/// Flat row handed to the tabular sinks (CSV / JSON).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionExport {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub hourly_rate: f64,
    pub earnings: f64,
}

impl From<&Session> for SessionExport {
    fn from(s: &Session) -> Self {
        Self {
            title: s.title.clone(),
            description: s.description.clone(),
            start_time: s.start_str(),
            end_time: s.end_str(),
            duration: secs2readable(s.duration_secs),
            hourly_rate: s.hourly_rate,
            earnings: s.earnings,
        }
    }
}

/// Project sessions to export rows, keeping only those inside `window`.
pub fn to_rows(sessions: &[Session], window: Option<&ExportWindow>) -> Vec<SessionExport> {
    sessions
        .iter()
        .filter(|s| window.is_none_or(|w| w.contains(s.start_time, s.end_time)))
        .map(SessionExport::from)
        .collect()
}
