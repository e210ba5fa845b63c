use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_days;
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{RESET, color_for_surplus, colorize_kind, colorize_optional};
use crate::utils::date::{date_with_weekday, parse_date};
use crate::utils::format_bank_balance;
use crate::utils::table::{Column, Table};

/// Detail view of one day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { date } = cmd {
        let d = parse_date(date)?;
        let ledger = cfg.ledger()?;
        let pool = DbPool::new(&cfg.database)?;

        let days = load_days(&pool, &ledger)?;
        let Some(day) = days.iter().find(|r| r.date() == d) else {
            info(format!("No punches for {}", d));
            return Ok(());
        };

        header(date_with_weekday(d));

        let mut table = Table::new(vec![
            Column::right("#"),
            Column::left("Type"),
            Column::left("Time"),
            Column::left("Location"),
            Column::left("Address"),
            Column::left("Photo"),
            Column::left("Id"),
        ]);

        for (i, ev) in day.entries().iter().enumerate() {
            table.add_row(vec![
                i.to_string(),
                colorize_kind(ev.kind.label(), ev.kind),
                ev.time_str(),
                format!("{:.6}, {:.6}", ev.latitude, ev.longitude),
                colorize_optional(&ev.address),
                colorize_optional(ev.photo_uri.as_deref().unwrap_or("")),
                ev.id.to_string(),
            ]);
        }

        print!("{}", table.render());

        let balance = day.bank_balance();
        println!(
            "\nBalance: {}{}{}",
            color_for_surplus(balance),
            format_bank_balance(balance),
            RESET
        );

        if day.has_irregular_entries() {
            warning(format!(
                "Irregular punches: {} entries / {} exits",
                day.count(EventKind::In),
                day.count(EventKind::Out)
            ));
        }
    }

    Ok(())
}
