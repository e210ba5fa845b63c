use crate::core::audit_quietly;
use crate::core::edit::{EventRef, find_day};
use crate::core::ledger::DayLedger;
use crate::db::queries::{load_days, save_days};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::day_record::DayRecord;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one punch of `date`. A day left without punches disappears
    /// from the stored list.
    ///
    /// Returns the removed punch and the day after removal.
    pub fn apply<S>(
        store: &mut S,
        ledger: &DayLedger,
        date: NaiveDate,
        target: EventRef,
    ) -> AppResult<(ClockEvent, DayRecord)>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut days = load_days(store, ledger)?;
        let idx = find_day(&days, date)?;

        let id = target.resolve(&days[idx])?;
        let index = days[idx]
            .position_of(&id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        let removed = days[idx].entries()[index].clone();

        let updated = ledger.remove_event(&days[idx], index)?;
        days[idx] = updated.clone();
        days.retain(|d| !d.is_empty());

        save_days(store, &days)?;

        audit_quietly(
            store,
            "del",
            &date.to_string(),
            &format!("{} at {} ({})", removed.kind.label(), removed.time_str(), removed.id),
        );

        Ok((removed, updated))
    }
}
