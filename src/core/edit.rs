use crate::core::audit_quietly;
use crate::core::ledger::DayLedger;
use crate::db::queries::{load_days, save_days};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::EventId;
use crate::models::day_record::DayRecord;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// How the punch to edit is chosen on the detail screen.
#[derive(Debug, Clone, Copy)]
pub enum EventRef {
    Index(usize),
    Id(EventId),
}

impl EventRef {
    /// Resolve to the stable id of a punch of `day`.
    pub fn resolve(&self, day: &DayRecord) -> AppResult<EventId> {
        match self {
            EventRef::Index(i) => day
                .entries()
                .get(*i)
                .map(|e| e.id)
                .ok_or(AppError::IndexOutOfRange {
                    index: *i,
                    len: day.len(),
                }),
            EventRef::Id(id) => day
                .position_of(id)
                .map(|_| *id)
                .ok_or_else(|| AppError::NotFound(format!("event {} on {}", id, day.date()))),
        }
    }
}

pub(crate) fn find_day(days: &[DayRecord], date: NaiveDate) -> AppResult<usize> {
    days.iter()
        .position(|d| d.date() == date)
        .ok_or_else(|| AppError::NoEventsForDate(date.to_string()))
}

pub struct EditLogic;

impl EditLogic {
    /// Change the timestamp of one punch and persist. When the new timestamp
    /// falls on another date the punch moves to that day.
    ///
    /// Returns the full list of days after the edit.
    pub fn apply<S>(
        store: &mut S,
        ledger: &DayLedger,
        date: NaiveDate,
        target: EventRef,
        new_timestamp: DateTime<FixedOffset>,
    ) -> AppResult<Vec<DayRecord>>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut days = load_days(store, ledger)?;
        let idx = find_day(&days, date)?;

        let id = target.resolve(&days[idx])?;
        let old = days[idx]
            .entries()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.timestamp)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        days[idx] = ledger.edit_event_timestamp(&days[idx], &id, new_timestamp)?;

        if new_timestamp.date_naive() != date {
            days = ledger.regroup(&days);
        }

        save_days(store, &days)?;

        audit_quietly(
            store,
            "edit",
            &date.to_string(),
            &format!("{}: {} -> {}", id, old.to_rfc3339(), new_timestamp.to_rfc3339()),
        );

        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use crate::models::clock_event::ClockEvent;
    use crate::models::event_kind::EventKind;
    use crate::models::location::Coordinates;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn seeded(ledger: &DayLedger) -> MemoryStore {
        let mk = |s: &str, k| ClockEvent::new(k, ts(s), Coordinates::new(0.0, 0.0), "");
        let days = ledger.group_and_balance(vec![
            mk("2025-03-10T08:00:00-03:00", EventKind::In),
            mk("2025-03-10T12:00:00-03:00", EventKind::Out),
        ]);
        let mut store = MemoryStore::new();
        save_days(&mut store, &days).unwrap();
        store
    }

    #[test]
    fn edit_by_index_persists_new_balance() {
        let ledger = DayLedger::default();
        let mut store = seeded(&ledger);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let days = EditLogic::apply(&mut store, &ledger, date, EventRef::Index(1), ts("2025-03-10T17:00:00-03:00")).unwrap();

        assert_eq!(days[0].bank_balance(), 0);
        assert_eq!(load_days(&store, &ledger).unwrap(), days);
        assert_eq!(store.audit_trail[0].0, "edit");
    }

    #[test]
    fn edit_to_other_date_moves_the_punch() {
        let ledger = DayLedger::default();
        let mut store = seeded(&ledger);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let days = EditLogic::apply(&mut store, &ledger, date, EventRef::Index(1), ts("2025-03-11T12:00:00-03:00")).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].len(), 1);
        assert_eq!(days[1].date(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }

    #[test]
    fn bad_targets() {
        let ledger = DayLedger::default();
        let mut store = seeded(&ledger);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let new_ts = ts("2025-03-10T09:00:00-03:00");

        let err = EditLogic::apply(&mut store, &ledger, date, EventRef::Index(5), new_ts).unwrap_err();
        assert!(matches!(err, AppError::IndexOutOfRange { .. }));

        let err = EditLogic::apply(&mut store, &ledger, date, EventRef::Id(EventId::new()), new_ts).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let other = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = EditLogic::apply(&mut store, &ledger, other, EventRef::Index(0), new_ts).unwrap_err();
        assert!(matches!(err, AppError::NoEventsForDate(_)));
    }
}
