use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{PunchDevices, PunchLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::models::location::Coordinates;
use crate::platform::cli::{FileCamera, FixedPosition, ManualGeocoder};
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{RESET, color_for_surplus, colorize_optional};
use crate::utils::date::date_with_weekday;
use crate::utils::format_bank_balance;
use crate::utils::time::parse_timestamp;
use std::path::PathBuf;

/// Record a punch and print the confirmation receipt.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        punch_in,
        punch_out: _,
        lat,
        lon,
        address,
        photo,
        at,
    } = cmd
    {
        //
        // 1. Direction and time
        //
        let kind = if *punch_in { EventKind::In } else { EventKind::Out };
        let at = at.as_deref().map(parse_timestamp).transpose()?;

        //
        // 2. Collaborators from the command line
        //
        let coords = match (lat, lon) {
            (Some(la), Some(lo)) => Some(Coordinates::new(*la, *lo)),
            _ => None,
        };
        let geolocator = FixedPosition {
            coords,
            permission_granted: cfg.allow_location,
        };
        let geocoder = ManualGeocoder {
            address: address.clone(),
        };
        let camera = FileCamera {
            path: photo.as_ref().map(PathBuf::from),
        };
        let devices = PunchDevices {
            geolocator: &geolocator,
            geocoder: &geocoder,
            camera: &camera,
        };

        //
        // 3. Execute logic
        //
        let ledger = cfg.ledger()?;
        let mut pool = DbPool::new(&cfg.database)?;
        let receipt =
            PunchLogic::apply(&mut pool, &ledger, &devices, kind, at, &cfg.photo_dir())?;

        //
        // 4. Receipt
        //
        let ev = &receipt.event;
        success(format!(
            "{} registered at {}",
            ev.kind.label(),
            ev.time_str()
        ));
        header("Punch receipt");
        println!("  Name              : {}", cfg.user_name);
        if !cfg.job_title.is_empty() {
            println!("  Job title         : {}", cfg.job_title);
        }
        println!("  Date              : {}", date_with_weekday(receipt.day.date()));
        println!("  Time              : {}", ev.time_str());
        println!("  Location          : {}", ev.coordinates().describe());
        println!("  Address           : {}", colorize_optional(&ev.address));
        if let Some(uri) = &ev.photo_uri {
            println!("  Photo             : {}", uri);
        }
        println!("  Registration code : {}", receipt.registration_code);

        let balance = receipt.day.bank_balance();
        println!(
            "  Day balance       : {}{}{}",
            color_for_surplus(balance),
            format_bank_balance(balance),
            RESET
        );

        if receipt.day.has_irregular_entries() {
            warning("This day has irregular punches (unmatched entries/exits).");
        }
    }

    Ok(())
}
