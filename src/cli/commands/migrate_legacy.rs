use crate::config::Config;
use crate::core::legacy::LegacyLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let ledger = cfg.ledger()?;
    let mut pool = DbPool::new(&cfg.database)?;

    let report = LegacyLogic::migrate(&mut pool, &ledger)?;

    if report.already_done {
        info("No legacy points to migrate.");
        return Ok(());
    }

    success(format!("{} legacy points migrated.", report.migrated));
    for raw in &report.skipped {
        warning(format!("Skipped point with unreadable timestamp: '{}'", raw));
    }

    Ok(())
}
