use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::balance::worked_minutes;
use crate::core::ledger::aggregate_balance;
use crate::core::session;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::event_kind::EventKind;
use crate::ui::messages::{info, notice};
use crate::utils::colors::{RESET, color_for_surplus, colorize_irregular};
use crate::utils::date::date_with_weekday;
use crate::utils::table::{Column, Table};
use crate::utils::{format_bank_balance, mins2readable};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { all } = cmd {
        let ledger = cfg.ledger()?;
        let pool = DbPool::new(&cfg.database)?;
        let model = session::load(&pool, &ledger, cfg.recent_days)?;

        if let Some(n) = &model.notice {
            notice(n);
        }

        if model.days.is_empty() {
            info("No punches recorded yet.");
            return Ok(());
        }

        let (days, total) = if *all {
            let newest_first: Vec<DayRecord> = model.days.iter().rev().cloned().collect();
            let total = aggregate_balance(&newest_first);
            (newest_first, total)
        } else {
            (model.visible.clone(), model.total_balance)
        };

        print_days(&days);

        println!(
            "\nTotal balance ({} days): {}{}{}",
            days.len(),
            color_for_surplus(total),
            format_bank_balance(total),
            RESET
        );
        println!(
            "Expected per day: {}",
            mins2readable(ledger.expected_minutes(), false)
        );
    }
    Ok(())
}

fn print_days(days: &[DayRecord]) {
    let mut table = Table::new(vec![
        Column::left("Date"),
        Column::right("In"),
        Column::right("Out"),
        Column::right("Worked"),
        Column::right("Balance"),
        Column::left(""),
    ]);

    for d in days {
        let balance = d.bank_balance();
        let irregular = d.has_irregular_entries();

        table.add_row(vec![
            colorize_irregular(&date_with_weekday(d.date()), irregular),
            d.count(EventKind::In).to_string(),
            d.count(EventKind::Out).to_string(),
            mins2readable(worked_minutes(d.entries()), false),
            format!(
                "{}{}{}",
                color_for_surplus(balance),
                format_bank_balance(balance),
                RESET
            ),
            if irregular {
                "⚠ irregular".to_string()
            } else {
                String::new()
            },
        ]);
    }

    print!("{}", table.render());
}
