use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Session;
use crate::utils::colors::{CYAN, RESET, colorize_earnings, colorize_optional};
use crate::utils::time::secs2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let session = pool.get_session(*id)?;
        print_session(&session, &cfg.currency);
    }
    Ok(())
}

/// Print every field of a session, one per line.
pub(crate) fn print_session(s: &Session, currency: &str) {
    let line = |label: &str, value: String| println!("{CYAN}{label:<12}{RESET} {value}");

    println!();
    line("ID", s.id.to_string());
    line("Title", s.title.clone());
    line("Description", colorize_optional(&s.description));
    line("Start", s.start_str());
    line("End", s.end_str());
    line("Duration", secs2readable(s.duration_secs));
    line("Rate", format!("{:.2}{}/h", s.hourly_rate, currency));
    line("Earnings", colorize_earnings(s.earnings, currency));
    line("External ID", s.external_id.clone());
    line("Created by", s.created_by.clone());
    println!();
}
