use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::sessions::SessionOrder;
use crate::errors::AppResult;
use crate::export::parse_range;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, RESET, colorize_earnings};
use crate::utils::table::Table;
use crate::utils::time::secs2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { range } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        let window = match range.as_deref() {
            Some(r) => parse_range(r)?,
            None => None,
        };

        let sessions: Vec<_> = pool
            .list_sessions(SessionOrder::EndTimeDesc)?
            .into_iter()
            .filter(|s| window.is_none_or(|w| w.contains(s.start_time, s.end_time)))
            .collect();

        if sessions.is_empty() {
            info("No sessions found.");
            return Ok(());
        }

        let mut table = Table::new([
            "ID",
            "Title",
            "Description",
            "Start",
            "End",
            "Duration",
            "Rate",
            "Earnings",
        ]);

        let mut total_secs = 0i64;
        let mut total_earnings = 0.0f64;

        for s in &sessions {
            total_secs += s.duration_secs;
            total_earnings += s.earnings;

            let description = if s.description.trim().is_empty() {
                "--".to_string()
            } else {
                s.description.clone()
            };

            table.add_row(vec![
                s.id.to_string(),
                s.title.clone(),
                description,
                s.start_str(),
                s.end_str(),
                secs2readable(s.duration_secs),
                format!("{:.2}", s.hourly_rate),
                format!("{:.2}", s.earnings),
            ]);
        }

        println!("{}", table.render());
        println!(
            "{CYAN}Sessions:{RESET} {} | {CYAN}Time:{RESET} {} | {CYAN}Earnings:{RESET} {}",
            sessions.len(),
            secs2readable(total_secs),
            colorize_earnings(total_earnings, &cfg.currency)
        );
    }

    Ok(())
}
