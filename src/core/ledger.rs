//! Grouping of punches into days and the daily bank-of-hours balance.
//!
//! Every operation is a pure transformation: inputs are borrowed and a new
//! `DayRecord` is returned, sorted and rebalanced.

use crate::core::calculator::balance::{calculate_balance, worked_minutes};
use crate::core::calculator::expected::DEFAULT_EXPECTED_MINUTES;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::{ClockEvent, EventId};
use crate::models::day_record::DayRecord;
use crate::models::event_kind::EventKind;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLedger {
    expected_minutes: i64,
}

impl Default for DayLedger {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_MINUTES)
    }
}

impl DayLedger {
    pub fn new(expected_minutes: i64) -> Self {
        Self { expected_minutes }
    }

    pub fn expected_minutes(&self) -> i64 {
        self.expected_minutes
    }

    /// Balance of an already sorted sequence of punches.
    pub fn balance_of(&self, sorted: &[ClockEvent]) -> i64 {
        calculate_balance(worked_minutes(sorted), self.expected_minutes)
    }

    fn build(&self, date: NaiveDate, mut events: Vec<ClockEvent>) -> DayRecord {
        // stable: punches with the same instant keep their insertion order
        events.sort_by_key(|e| e.timestamp);
        let balance = self.balance_of(&events);
        DayRecord::from_parts(date, events, balance)
    }

    /// Partition punches by the calendar date of their timestamp (in the
    /// offset they were recorded with) and balance each day.
    ///
    /// Days come out in ascending date order.
    pub fn group_and_balance<I>(&self, events: I) -> Vec<DayRecord>
    where
        I: IntoIterator<Item = ClockEvent>,
    {
        let mut by_date: BTreeMap<NaiveDate, Vec<ClockEvent>> = BTreeMap::new();
        for ev in events {
            by_date.entry(ev.local_date()).or_default().push(ev);
        }

        by_date
            .into_iter()
            .map(|(date, evs)| self.build(date, evs))
            .collect()
    }

    /// Re-sort and recompute a record, e.g. after loading it from storage.
    pub fn rebalance(&self, day: &DayRecord) -> DayRecord {
        self.build(day.date(), day.entries().to_vec())
    }

    /// Flatten and group again. Used when an edit moved a punch to another date.
    pub fn regroup(&self, days: &[DayRecord]) -> Vec<DayRecord> {
        self.group_and_balance(days.iter().flat_map(|d| d.entries().iter().cloned()))
    }

    /// Append a punch with the given direction.
    pub fn add_event(&self, day: &DayRecord, kind: EventKind, mut event: ClockEvent) -> DayRecord {
        event.kind = kind;
        let mut events = day.entries().to_vec();
        events.push(event);
        self.build(day.date(), events)
    }

    /// Remove the punch at `index` of the sorted sequence.
    pub fn remove_event(&self, day: &DayRecord, index: usize) -> AppResult<DayRecord> {
        if index >= day.len() {
            return Err(AppError::IndexOutOfRange {
                index,
                len: day.len(),
            });
        }

        let mut events = day.entries().to_vec();
        events.remove(index);
        Ok(self.build(day.date(), events))
    }

    /// Replace the timestamp of the punch identified by `id`.
    pub fn edit_event_timestamp(
        &self,
        day: &DayRecord,
        id: &EventId,
        new_timestamp: DateTime<FixedOffset>,
    ) -> AppResult<DayRecord> {
        let pos = day
            .position_of(id)
            .ok_or_else(|| AppError::NotFound(format!("event {} on {}", id, day.date())))?;

        let mut events = day.entries().to_vec();
        events[pos].timestamp = new_timestamp;
        Ok(self.build(day.date(), events))
    }

    /// Add a punch to the list of days, creating the day when it is the first
    /// punch of its date.
    pub fn record_event(&self, days: &[DayRecord], event: ClockEvent) -> Vec<DayRecord> {
        let date = event.local_date();
        let mut out: Vec<DayRecord> = days.to_vec();

        match out.iter().position(|d| d.date() == date) {
            Some(i) => {
                let kind = event.kind;
                out[i] = self.add_event(&out[i], kind, event);
            }
            None => {
                out.push(self.build(date, vec![event]));
                out.sort_by_key(|d| d.date());
            }
        }
        out
    }
}

/// The `n` most recent days, newest first.
pub fn recent_days(days: &[DayRecord], n: usize) -> Vec<DayRecord> {
    let mut sorted = days.to_vec();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted.truncate(n);
    sorted
}

/// Sum of the daily balances of the displayed days.
pub fn aggregate_balance(days: &[DayRecord]) -> i64 {
    days.iter().map(DayRecord::bank_balance).sum()
}
