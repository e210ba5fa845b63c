use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{EditLogic, EventRef};
use crate::db::pool::DbPool;
use crate::db::queries::load_days;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::EventId;
use crate::ui::messages::success;
use crate::utils::colors::{RESET, color_for_surplus};
use crate::utils::date::parse_date;
use crate::utils::format_bank_balance;
use crate::utils::time::{parse_time, parse_timestamp, with_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        date,
        index,
        id,
        time,
        at,
    } = cmd
    {
        //
        // 1. Parse arguments
        //
        let d = parse_date(date)?;
        let target = match (index, id) {
            (_, Some(raw)) => EventRef::Id(
                raw.parse::<EventId>()
                    .map_err(|_| AppError::NotFound(format!("event {}", raw)))?,
            ),
            (Some(i), None) => EventRef::Index(*i),
            (None, None) => {
                return Err(AppError::ValidationFailed("use --index or --id".into()));
            }
        };

        let ledger = cfg.ledger()?;
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 2. New timestamp: --at as given, --time on the same day and offset
        //
        let new_ts = match (at, time) {
            (Some(raw), _) => parse_timestamp(raw)?,
            (None, Some(raw)) => {
                let t = parse_time(raw)?;
                let days = load_days(&pool, &ledger)?;
                let day = days
                    .iter()
                    .find(|r| r.date() == d)
                    .ok_or_else(|| AppError::NoEventsForDate(d.to_string()))?;
                let event_id = target.resolve(day)?;
                let current = day
                    .entries()
                    .iter()
                    .find(|e| e.id == event_id)
                    .ok_or_else(|| AppError::NotFound(event_id.to_string()))?;
                with_time(&current.timestamp, t)?
            }
            (None, None) => {
                return Err(AppError::ValidationFailed("use --time or --at".into()));
            }
        };

        //
        // 3. Execute logic
        //
        let days = EditLogic::apply(&mut pool, &ledger, d, target, new_ts)?;

        success(format!("Punch moved to {}", new_ts.format("%Y-%m-%d %H:%M:%S")));
        if let Some(day) = days.iter().find(|r| r.date() == new_ts.date_naive()) {
            let balance = day.bank_balance();
            println!(
                "Day {} balance: {}{}{}",
                day.date(),
                color_for_surplus(balance),
                format_bank_balance(balance),
                RESET
            );
        }
    }

    Ok(())
}
