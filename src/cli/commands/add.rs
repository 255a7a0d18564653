use crate::cli::commands::show::print_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::identity::DeviceId;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, device: &DeviceId) -> AppResult<()> {
    if let Commands::Add {
        title,
        description,
        start,
        end,
        rate,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        let session = AddLogic::manual(
            &mut pool,
            device,
            title,
            description.as_deref(),
            start,
            end,
            rate.as_deref(),
            cfg.default_hourly_rate,
        )?;

        success(format!("Session #{} saved.", session.id));
        print_session(&session, &cfg.currency);
    }

    Ok(())
}
