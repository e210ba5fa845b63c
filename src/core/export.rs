use crate::core::ledger::DayLedger;
use crate::db::queries::load_days;
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::ui::messages::{confirm, info, success, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat row, one per punch.
#[derive(Serialize, Clone, Debug)]
pub struct PunchExport {
    pub date: String,
    pub index: usize,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub day_balance: i64,
    pub irregular: bool,
}

pub(crate) fn days_to_rows(days: &[DayRecord]) -> Vec<PunchExport> {
    days.iter()
        .flat_map(|d| {
            d.entries().iter().enumerate().map(move |(i, e)| PunchExport {
                date: d.date().to_string(),
                index: i,
                id: e.id.to_string(),
                kind: e.kind.label().to_string(),
                timestamp: e.timestamp.to_rfc3339(),
                latitude: e.latitude,
                longitude: e.longitude,
                address: e.address.clone(),
                day_balance: d.bank_balance(),
                irregular: d.has_irregular_entries(),
            })
        })
        .collect()
}

/// Refuse to overwrite unless forced or confirmed.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if confirm("Overwrite?")? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "existing file not overwritten".to_string(),
        ))
    }
}

fn export_json(days: &[DayRecord], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(days)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

fn export_csv(days: &[DayRecord], path: &Path) -> AppResult<()> {
    let mut wtr =
        csv::Writer::from_path(path).map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for row in days_to_rows(days) {
        wtr.serialize(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export every day record. JSON keeps the persisted shape, CSV is flat.
    pub fn export<S>(
        store: &S,
        ledger: &DayLedger,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize>
    where
        S: KeyValueStore + ?Sized,
    {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let days = load_days(store, ledger)?;
        info(format!(
            "Exporting {} days to {}: {}",
            days.len(),
            format.as_str().to_uppercase(),
            path.display()
        ));

        match format {
            ExportFormat::Json => export_json(&days, path)?,
            ExportFormat::Csv => export_csv(&days, path)?,
        }

        success(format!("Export completed: {}", path.display()));
        Ok(days.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock_event::ClockEvent;
    use crate::models::event_kind::EventKind;
    use crate::models::location::Coordinates;
    use chrono::DateTime;

    #[test]
    fn rows_are_flat_and_indexed() {
        let ledger = DayLedger::default();
        let mk = |s: &str, k| {
            ClockEvent::new(
                k,
                DateTime::parse_from_rfc3339(s).unwrap(),
                Coordinates::new(1.0, 2.0),
                "Rua A",
            )
        };
        let days = ledger.group_and_balance(vec![
            mk("2025-03-10T08:00:00-03:00", EventKind::In),
            mk("2025-03-10T12:00:00-03:00", EventKind::Out),
            mk("2025-03-11T08:00:00-03:00", EventKind::In),
        ]);

        let rows = days_to_rows(&days);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].kind, "SAIDA");
        assert_eq!(rows[1].day_balance, -300);
        assert_eq!(rows[2].index, 0);
        assert!(rows[2].irregular);
    }
}
