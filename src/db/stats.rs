use crate::core::ledger::DayLedger;
use crate::db::migrate::applied_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::{load_adjustments, load_days, load_points};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str, ledger: &DayLedger) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) CONTENT
    //
    let days = load_days(pool, ledger)?;
    let events: usize = days.iter().map(|d| d.len()).sum();
    println!(
        "{}• Days / events:{} {}{}{} / {}{}{}",
        CYAN, RESET, GREEN, days.len(), RESET, GREEN, events, RESET
    );
    println!(
        "{}• Legacy points:{} {}",
        CYAN,
        RESET,
        load_points(pool)?.len()
    );
    println!(
        "{}• Adjustment requests:{} {}",
        CYAN,
        RESET,
        load_adjustments(pool)?.len()
    );

    //
    // 3) DATE RANGE
    //
    let fmt = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(days.first().map(|d| d.date())));
    println!("    to:   {}", fmt(days.last().map(|d| d.date())));

    //
    // 4) SCHEMA
    //
    println!("{}• Migrations:{}", CYAN, RESET);
    for m in applied_migrations(&pool.conn)? {
        println!("    {}", m);
    }

    println!();
    Ok(())
}
