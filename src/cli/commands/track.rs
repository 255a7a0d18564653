use crate::cli::commands::show::print_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, resolve_rate};
use crate::core::timer::{LiveTimer, TimerSnapshot};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::identity::DeviceId;
use crate::ui::messages::{info, live, prompt_line, success, warning};
use crate::utils::time::{format_timestamp, parse_rate, secs2clock, secs2readable};
use std::io;
use std::time::Duration;

fn render(snap: &TimerSnapshot, currency: &str) -> String {
    match snap.provisional_earnings {
        Some(e) => format!("{}  {:.2}{}", secs2clock(snap.elapsed_secs), e, currency),
        None => secs2clock(snap.elapsed_secs),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, device: &DeviceId) -> AppResult<()> {
    if let Commands::Track {
        title,
        description,
        rate,
    } = cmd
    {
        // open first: an unreachable store must fail before any time is tracked
        let mut pool = DbPool::open(&cfg.database)?;

        let known_rate = match rate.as_deref() {
            Some(r) => Some(parse_rate(r)?),
            None => cfg.default_hourly_rate,
        };

        let currency = cfg.currency.clone();
        let mut timer = LiveTimer::system(Duration::from_millis(cfg.tick_interval_ms))
            .on_tick(move |snap| live(render(snap, &currency)));

        let started_at = timer.start(known_rate)?;
        info(format!(
            "Timer started at {}. Press Enter to stop.",
            format_timestamp(&started_at)
        ));

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;

        let run = timer.stop()?;
        println!();
        success(format!(
            "Timer stopped at {} ({})",
            format_timestamp(&run.ended_at),
            secs2readable((run.ended_at - run.started_at).num_seconds())
        ));

        let title = match title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => ask_title()?,
        };

        let description = match description {
            Some(d) => d.clone(),
            None => prompt_line("Description (optional):").unwrap_or_default(),
        };

        let hourly_rate = match known_rate {
            Some(r) => r,
            None => ask_rate(),
        };

        let session =
            AddLogic::from_timer(&mut pool, device, &run, &title, &description, hourly_rate)?;

        success(format!("Session #{} saved.", session.id));
        print_session(&session, &cfg.currency);
    }

    Ok(())
}

fn ask_title() -> AppResult<String> {
    loop {
        match prompt_line("Title:") {
            Some(t) if !t.is_empty() => return Ok(t),
            Some(_) => warning("The title must not be empty."),
            None => {
                return Err(AppError::Validation(
                    "no title given, session discarded".into(),
                ));
            }
        }
    }
}

/// Empty input or end of input means no rate.
fn ask_rate() -> f64 {
    loop {
        let Some(raw) = prompt_line("Hourly rate (empty for none):") else {
            return 0.0;
        };
        match resolve_rate(Some(&raw), None) {
            Ok(r) => return r,
            Err(e) => warning(e),
        }
    }
}
