use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let dest = expand_tilde(file);
        if !dest.is_absolute() {
            return Err(AppError::Validation(format!(
                "backup path must be absolute: {file}"
            )));
        }

        let pool = DbPool::open(&cfg.database)?;
        BackupLogic::backup(&pool, &cfg.database, &dest, *compress)?;
    }

    Ok(())
}
