use crate::cli::commands::show::print_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        let session = pool.get_session(*id)?;
        print_session(&session, &cfg.currency);

        if !*yes
            && !confirm(&format!(
                "Delete session #{}? This action is irreversible.",
                id
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = DeleteLogic::apply(&mut pool, *id)?;
        success(format!(
            "Session #{} '{}' has been deleted.",
            removed.id, removed.title
        ));
    }

    Ok(())
}
