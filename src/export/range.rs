// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Inclusive time window used to filter sessions for export and listing.
///
/// A session is inside the window iff `start >= window.start` and
/// `end <= window.end`; sessions straddling a bound are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ExportWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Parse --range (year / month / day / interval) into a window.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// `all` (any case) means no window.
pub fn parse_range(r: &str) -> AppResult<Option<ExportWindow>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (first, last) = if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::Parse(format!(
                "range '{r}': start and end must have the same format"
            )));
        }

        let (first, _) = period_days(start)?;
        let (_, last) = period_days(end)?;
        (first, last)
    } else {
        period_days(r)?
    };

    let start = first
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Parse(format!("invalid range '{r}'")))?;
    let end = last
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| AppError::Parse(format!("invalid range '{r}'")))?;

    ExportWindow::new(start, end).map(Some)
}

/// First and last day covered by a single period expression.
fn period_days(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::Parse(format!("invalid period '{p}'"));

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let d2 = last_day_of_month(d1).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
