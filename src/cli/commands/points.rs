use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::legacy::LegacyLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::location::Coordinates;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_timestamp;
use chrono::Local;

/// Legacy point list: optional `--add`, then the list newest first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Points {
        add,
        lat,
        lon,
        address,
        at,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *add {
            let (Some(la), Some(lo)) = (lat, lon) else {
                return Err(AppError::LocationUnavailable(
                    "no position given (use --lat and --lon)".into(),
                ));
            };
            let coords = Coordinates::new(*la, *lo);
            if !coords.is_valid() {
                return Err(AppError::LocationUnavailable(format!(
                    "coordinates out of range: {}",
                    coords.describe()
                )));
            }

            let at = match at {
                Some(raw) => parse_timestamp(raw)?,
                None => Local::now().fixed_offset(),
            };

            let point = LegacyLogic::record_point(
                &mut pool,
                coords,
                address.clone().unwrap_or_default(),
                &cfg.user_name,
                at,
                cfg.legacy_points_limit,
            )?;
            success(format!(
                "Point recorded at {} (code {})",
                point.timestamp, point.registration_code
            ));
        }

        let points = LegacyLogic::list(&pool)?;
        if points.is_empty() {
            info("No legacy points.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Timestamp"),
            Column::left("User"),
            Column::left("Code"),
            Column::left("Location"),
            Column::left("Address"),
        ]);

        for p in &points {
            table.add_row(vec![
                p.timestamp.clone(),
                colorize_optional(&p.user_name),
                colorize_optional(&p.registration_code),
                Coordinates::new(p.latitude, p.longitude).describe(),
                colorize_optional(&p.address),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
