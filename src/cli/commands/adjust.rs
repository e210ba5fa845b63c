use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::adjust::{AdjustLogic, AdjustmentForm};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::EventId;
use crate::platform::cli::PathPicker;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Adjust {
        list,
        date,
        reason,
        file,
        event,
    } = cmd
    {
        if *list {
            let pool = DbPool::new(&cfg.database)?;
            return print_requests(&pool);
        }

        //
        // 1. Form
        //
        let date = date
            .as_deref()
            .ok_or_else(|| AppError::ValidationFailed("--date is required".into()))?;
        let event_id = event
            .as_deref()
            .map(|raw| {
                raw.parse::<EventId>()
                    .map_err(|_| AppError::NotFound(format!("event {}", raw)))
            })
            .transpose()?;

        let form = AdjustmentForm {
            date: parse_date(date)?,
            reason: reason.clone(),
            event_id,
        };
        let picker = PathPicker {
            path: file.as_ref().map(PathBuf::from),
        };

        //
        // 2. Submit
        //
        let ledger = cfg.ledger()?;
        let mut pool = DbPool::new(&cfg.database)?;
        let request =
            AdjustLogic::submit(&mut pool, &ledger, &picker, &form, &cfg.attachment_dir())?;

        success(format!(
            "Adjustment request for {} sent ({}).",
            request.date,
            request.status.as_str()
        ));
        info(format!("Attachment stored at {}", request.attachment.uri));
    }

    Ok(())
}

fn print_requests(pool: &DbPool) -> AppResult<()> {
    let requests = AdjustLogic::list(pool)?;

    if requests.is_empty() {
        info("No adjustment requests.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Created"),
        Column::left("Date"),
        Column::left("Status"),
        Column::left("Reason"),
        Column::left("Attachment"),
        Column::left("Event"),
    ]);

    for r in &requests {
        table.add_row(vec![
            r.created_at.format("%Y-%m-%d %H:%M").to_string(),
            r.date.to_string(),
            r.status.as_str().to_string(),
            r.reason.clone(),
            r.attachment.name.clone(),
            colorize_optional(&r.event_id.map(|id| id.short()).unwrap_or_default()),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
