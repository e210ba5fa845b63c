use super::clock_event::{ClockEvent, EventId};
use super::event_kind::EventKind;
use chrono::{DateTime, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One calendar day of punches, as persisted under the `timeEntries` key.
///
/// `entries` is always sorted by timestamp and `bank_balance` is always the
/// balance of `entries`; both are maintained by `core::ledger::DayLedger`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(deserialize_with = "date_from_str")]
    date: NaiveDate,
    #[serde(deserialize_with = "entries_with_ids")]
    entries: Vec<ClockEvent>,
    #[serde(deserialize_with = "minutes_from_number")]
    bank_balance: i64,
}

/// Older blobs stored the balance as a fractional number of minutes.
fn minutes_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round() as i64)
}

/// Accepts `YYYY-MM-DD`, a full RFC 3339 timestamp, or anything starting
/// with a `YYYY-MM-DD` prefix.
fn date_from_str<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok((date, _)) = NaiveDate::parse_and_remainder(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| D::Error::custom(format!("invalid day date '{raw}'")))
}

/// Punches stored without an id get one derived from their content and
/// position, so it stays the same across loads.
fn entries_with_ids<'de, D>(deserializer: D) -> Result<Vec<ClockEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut entries = Vec::<ClockEvent>::deserialize(deserializer)?;
    for (position, e) in entries.iter_mut().enumerate() {
        if e.id.is_unassigned() {
            e.id = EventId::derived(e.kind, &e.timestamp, e.latitude, e.longitude, position);
        }
    }
    Ok(entries)
}

impl DayRecord {
    pub(crate) fn from_parts(date: NaiveDate, entries: Vec<ClockEvent>, bank_balance: i64) -> Self {
        Self {
            date,
            entries,
            bank_balance,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &[ClockEvent] {
        &self.entries
    }

    pub fn bank_balance(&self) -> i64 {
        self.bank_balance
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Warning flag for the day list: unbalanced punches or more than one
    /// punch of the same direction. Does not affect the balance.
    pub fn has_irregular_entries(&self) -> bool {
        let ins = self.count(EventKind::In);
        let outs = self.count(EventKind::Out);
        ins != outs || ins > 1 || outs > 1
    }

    pub fn position_of(&self, id: &EventId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}
