use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::edit::EventRef;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::format_bank_balance;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date: date_str,
        index,
        yes,
    } = cmd
    {
        let d = parse_date(date_str)?;

        //
        // Confirmation prompt
        //
        if !*yes {
            warning(format!(
                "Delete punch #{} of {}? This action is irreversible.",
                index, d
            ));
            if !confirm("Confirm")? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        //
        // Execute deletion
        //
        let ledger = cfg.ledger()?;
        let mut pool = DbPool::new(&cfg.database)?;

        let (removed, day) = DeleteLogic::apply(&mut pool, &ledger, d, EventRef::Index(*index))?;

        success(format!(
            "Removed {} at {} from {}.",
            removed.kind.label(),
            removed.time_str(),
            d
        ));

        if day.is_empty() {
            info(format!("{} has no punches left.", d));
        } else {
            info(format!(
                "New balance for {}: {}",
                d,
                format_bank_balance(day.bank_balance())
            ));
        }
    }

    Ok(())
}
