//! Home screen state as an immutable model updated by messages.
//!
//! `update` is pure; `run` applies a message and writes the day list back to
//! the injected store when it changed.

use crate::core::ledger::{DayLedger, aggregate_balance, recent_days};
use crate::db::queries::{load_days, save_days};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::{ClockEvent, EventId};
use crate::models::day_record::DayRecord;
use chrono::{DateTime, FixedOffset, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub days: Vec<DayRecord>,
    /// Most recent days shown on the home screen, newest first.
    pub visible: Vec<DayRecord>,
    pub total_balance: i64,
    pub address: String,
    pub notice: Option<Notice>,
    pub logged_in: bool,
    recent: usize,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Loaded(Vec<DayRecord>),
    Punched(ClockEvent),
    Remove { date: NaiveDate, index: usize },
    Edit { date: NaiveDate, id: EventId, timestamp: DateTime<FixedOffset> },
    AddressResolved(String),
    Failed(String),
    DismissNotice,
    Logout,
}

impl Model {
    pub fn new(recent: usize) -> Self {
        Self {
            days: Vec::new(),
            visible: Vec::new(),
            total_balance: 0,
            address: String::new(),
            notice: None,
            logged_in: true,
            recent,
        }
    }

    fn with_days(&self, days: Vec<DayRecord>) -> Self {
        let visible = recent_days(&days, self.recent);
        Self {
            total_balance: aggregate_balance(&visible),
            visible,
            days,
            ..self.clone()
        }
    }

    fn with_error(&self, e: AppError) -> Self {
        Self {
            notice: Some(Notice::Error(e.to_string())),
            ..self.clone()
        }
    }

    fn day_index(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.date() == date)
    }
}

pub fn update(model: &Model, msg: Msg, ledger: &DayLedger) -> Model {
    match msg {
        Msg::Loaded(days) => model.with_days(days),

        Msg::Punched(event) => {
            let days = ledger.record_event(&model.days, event);
            let mut next = model.with_days(days);
            next.notice = Some(Notice::Info("Punch recorded".into()));
            next
        }

        Msg::Remove { date, index } => {
            let Some(i) = model.day_index(date) else {
                return model.with_error(AppError::NoEventsForDate(date.to_string()));
            };
            match ledger.remove_event(&model.days[i], index) {
                Ok(day) => {
                    let mut days = model.days.clone();
                    days[i] = day;
                    days.retain(|d| !d.is_empty());
                    model.with_days(days)
                }
                Err(e) => model.with_error(e),
            }
        }

        Msg::Edit {
            date,
            id,
            timestamp,
        } => {
            let Some(i) = model.day_index(date) else {
                return model.with_error(AppError::NoEventsForDate(date.to_string()));
            };
            match ledger.edit_event_timestamp(&model.days[i], &id, timestamp) {
                Ok(day) => {
                    let mut days = model.days.clone();
                    days[i] = day;
                    model.with_days(ledger.regroup(&days))
                }
                Err(e) => model.with_error(e),
            }
        }

        Msg::AddressResolved(address) => Model {
            address,
            ..model.clone()
        },

        Msg::Failed(text) => Model {
            notice: Some(Notice::Error(text)),
            ..model.clone()
        },

        Msg::DismissNotice => Model {
            notice: None,
            ..model.clone()
        },

        Msg::Logout => Model {
            logged_in: false,
            notice: Some(Notice::Info("You have been logged out".into())),
            ..model.clone()
        },
    }
}

/// Load the model from the store.
pub fn load<S>(store: &S, ledger: &DayLedger, recent: usize) -> AppResult<Model>
where
    S: KeyValueStore + ?Sized,
{
    let days = load_days(store, ledger)?;
    Ok(update(&Model::new(recent), Msg::Loaded(days), ledger))
}

/// Apply `msg` and persist the days when they changed.
pub fn run<S>(store: &mut S, model: &Model, msg: Msg, ledger: &DayLedger) -> AppResult<Model>
where
    S: KeyValueStore + ?Sized,
{
    let next = update(model, msg, ledger);
    if next.days != model.days {
        save_days(store, &next.days)?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use crate::models::event_kind::EventKind;
    use crate::models::location::Coordinates;
    use chrono::Duration;

    fn ev(day: i64, minute: i64, kind: EventKind) -> ClockEvent {
        let base = DateTime::parse_from_rfc3339("2025-03-03T08:00:00-03:00").unwrap();
        ClockEvent::new(
            kind,
            base + Duration::days(day) + Duration::minutes(minute),
            Coordinates::new(0.0, 0.0),
            "",
        )
    }

    fn week(ledger: &DayLedger) -> Vec<DayRecord> {
        let mut evs = Vec::new();
        for d in 0..7 {
            evs.push(ev(d, 0, EventKind::In));
            evs.push(ev(d, 540 + d * 10, EventKind::Out));
        }
        ledger.group_and_balance(evs)
    }

    #[test]
    fn loaded_model_shows_recent_five_and_their_total() {
        let ledger = DayLedger::default();
        let m = update(&Model::new(5), Msg::Loaded(week(&ledger)), &ledger);

        assert_eq!(m.days.len(), 7);
        assert_eq!(m.visible.len(), 5);
        // days 2..=6 → 20+30+40+50+60
        assert_eq!(m.total_balance, 200);
    }

    #[test]
    fn remove_updates_total_by_the_delta() {
        let ledger = DayLedger::default();
        let m = update(&Model::new(5), Msg::Loaded(week(&ledger)), &ledger);
        let last = m.visible[0].date();

        let next = update(&m, Msg::Remove { date: last, index: 1 }, &ledger);

        // day 6 goes from +60 to -540
        assert_eq!(next.total_balance, m.total_balance - 600);
        assert_eq!(m.days.len(), 7, "previous model is untouched");
    }

    #[test]
    fn failed_remove_sets_error_notice() {
        let ledger = DayLedger::default();
        let m = update(&Model::new(5), Msg::Loaded(week(&ledger)), &ledger);
        let last = m.visible[0].date();

        let next = update(&m, Msg::Remove { date: last, index: 9 }, &ledger);
        assert!(matches!(next.notice, Some(Notice::Error(_))));
        assert_eq!(next.days, m.days);
    }

    #[test]
    fn run_persists_only_on_change() {
        let ledger = DayLedger::default();
        let mut store = MemoryStore::new();
        let m = load(&store, &ledger, 5).unwrap();

        let m = run(&mut store, &m, Msg::AddressResolved("Rua A".into()), &ledger).unwrap();
        assert!(store.keys().unwrap().is_empty());

        let m = run(&mut store, &m, Msg::Punched(ev(0, 0, EventKind::In)), &ledger).unwrap();
        assert_eq!(load(&store, &ledger, 5).unwrap().days, m.days);
        assert_eq!(m.address, "Rua A");
    }

    #[test]
    fn logout_and_dismiss() {
        let ledger = DayLedger::default();
        let m = update(&Model::new(5), Msg::Logout, &ledger);
        assert!(!m.logged_in);
        let m = update(&m, Msg::DismissNotice, &ledger);
        assert!(m.notice.is_none());
    }
}
