use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::secs2readable;
use rusqlite::OptionalExtension;
use std::fs;

/// Aggregate figures over all stored sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreTotals {
    pub count: i64,
    pub total_secs: i64,
    pub total_earnings: f64,
}

pub fn totals(pool: &DbPool) -> AppResult<StoreTotals> {
    let (count, total_secs, total_earnings): (i64, i64, f64) = pool.conn.query_row(
        "SELECT COUNT(*), IFNULL(SUM(difference), 0), IFNULL(SUM(earnings), 0.0)
         FROM work_sessions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(StoreTotals {
        count,
        total_secs,
        total_earnings,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str, currency: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTALS
    //
    let t = totals(pool)?;
    println!(
        "{}• Sessions:{} {}{}{}",
        CYAN, RESET, GREEN, t.count, RESET
    );
    println!(
        "{}• Time tracked:{} {}",
        CYAN,
        RESET,
        secs2readable(t.total_secs)
    );
    println!(
        "{}• Earnings:{} {:.2}{}",
        CYAN, RESET, t.total_earnings, currency
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM work_sessions ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT end_time FROM work_sessions ORDER BY end_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
