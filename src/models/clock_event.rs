use super::{event_kind::EventKind, location::Coordinates};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a clock event (UUID v7, time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Six-digit registration code shown on the punch receipt.
    pub fn receipt_code(&self) -> String {
        format!("{:06}", self.0.as_u128() % 1_000_000)
    }

    /// Id for a stored punch saved without one. The same punch at the same
    /// position of its stored day always gets the same id.
    pub fn derived(
        kind: EventKind,
        timestamp: &DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        position: usize,
    ) -> Self {
        let name = format!(
            "{}|{}|{}|{}|{}",
            kind.label(),
            timestamp.to_rfc3339(),
            latitude,
            longitude,
            position
        );
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }

    /// Placeholder carried by a punch deserialized without an id.
    fn unassigned() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_nil()
    }

    /// First block of the UUID, enough to identify an event on screen.
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(8).collect()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A single punch.
///
/// Only `timestamp` changes after creation, through an explicit edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockEvent {
    #[serde(default = "EventId::unassigned")]
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub timestamp: DateTime<FixedOffset>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

impl ClockEvent {
    pub fn new(
        kind: EventKind,
        timestamp: DateTime<FixedOffset>,
        coords: Coordinates,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp,
            latitude: coords.latitude,
            longitude: coords.longitude,
            address: address.into(),
            photo_uri: None,
        }
    }

    pub fn with_photo(mut self, uri: impl Into<String>) -> Self {
        self.photo_uri = Some(uri.into());
        self
    }

    /// Calendar date in the offset the timestamp was recorded with.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn local_date_follows_recorded_offset() {
        // 23:30 in São Paulo is already the next day in UTC.
        let ev = ClockEvent::new(
            EventKind::Out,
            ts("2025-03-10T23:30:00-03:00"),
            Coordinates::new(-23.55, -46.63),
            "",
        );
        assert_eq!(ev.local_date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn missing_address_defaults_to_empty() {
        let json = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "type": "ENTRADA",
            "timestamp": "2025-03-10T08:00:00-03:00",
            "latitude": -23.5,
            "longitude": -46.6
        }"#;
        let ev: ClockEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.address, "");
        assert_eq!(ev.kind, EventKind::In);
        assert!(ev.photo_uri.is_none());
    }

    #[test]
    fn missing_id_is_unassigned_until_derived() {
        let json = r#"{"type":"SAIDA","timestamp":"2025-03-10T17:00:00-03:00","latitude":1.5,"longitude":2.5}"#;
        let ev: ClockEvent = serde_json::from_str(json).unwrap();
        assert!(ev.id.is_unassigned());

        let a = EventId::derived(ev.kind, &ev.timestamp, ev.latitude, ev.longitude, 1);
        let b = EventId::derived(ev.kind, &ev.timestamp, ev.latitude, ev.longitude, 1);
        let other = EventId::derived(ev.kind, &ev.timestamp, ev.latitude, ev.longitude, 2);
        assert_eq!(a, b);
        assert_ne!(a, other);
        assert!(!a.is_unassigned());
    }

    #[test]
    fn receipt_code_is_six_digits() {
        let code = EventId::new().receipt_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}
