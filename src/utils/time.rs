//! Time utilities: canonical timestamp parsing/formatting, rate parsing and
//! human readable durations.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, SubsecRound};

/// Canonical text format for stored and user-supplied timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let trimmed = s.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT).map_err(|_| {
        AppError::Parse(format!(
            "invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS",
            trimmed
        ))
    })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Local wall clock truncated to whole seconds, matching the stored precision.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Parse an hourly rate typed by a human. Accepts `,` as decimal separator.
pub fn parse_rate(s: &str) -> AppResult<f64> {
    let normalized = s.trim().replace(',', ".");
    let rate: f64 = normalized
        .parse()
        .map_err(|_| AppError::Parse(format!("invalid hourly rate '{}'", s.trim())))?;

    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::Validation(format!(
            "hourly rate must be a non-negative number, got {}",
            s.trim()
        )));
    }
    Ok(rate)
}

/// `28800` → `8h 00m 00s`
pub fn secs2readable(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!(
        "{}{}h {:02}m {:02}s",
        sign,
        s / 3600,
        (s % 3600) / 60,
        s % 60
    )
}

/// `28800` → `08:00:00`, used by the live timer line.
pub fn secs2clock(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}
