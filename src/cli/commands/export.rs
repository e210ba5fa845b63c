use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let ledger = cfg.ledger()?;
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool, &ledger, *format, file, *force)?;
    }
    Ok(())
}
