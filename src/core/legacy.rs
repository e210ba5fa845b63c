//! Handling of the flat `points` list left by the first iteration of the app,
//! and its one-time migration into day records.

use crate::core::audit_quietly;
use crate::core::ledger::DayLedger;
use crate::db::queries::{has_points, load_days, load_points, remove_points, save_days, save_points};
use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use crate::models::clock_event::{ClockEvent, EventId};
use crate::models::event_kind::EventKind;
use crate::models::legacy_point::LegacyPoint;
use crate::models::location::Coordinates;
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use std::collections::BTreeMap;

/// Outcome of `LegacyLogic::migrate`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub migrated: usize,
    /// Raw timestamps that could not be parsed.
    pub skipped: Vec<String>,
    pub already_done: bool,
}

pub struct LegacyLogic;

impl LegacyLogic {
    /// Newest first, as the old list screen showed them.
    pub fn list<S>(store: &S) -> AppResult<Vec<LegacyPoint>>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut points = load_points(store)?;
        points.sort_by_cached_key(|p| std::cmp::Reverse(p.parsed_timestamp()));
        Ok(points)
    }

    /// Prepend a point and keep only the newest `limit` entries.
    pub fn record_point<S>(
        store: &mut S,
        coords: Coordinates,
        address: String,
        user_name: &str,
        at: DateTime<FixedOffset>,
        limit: usize,
    ) -> AppResult<LegacyPoint>
    where
        S: KeyValueStore + ?Sized,
    {
        let point = LegacyPoint {
            timestamp: at.format("%d/%m/%Y %H:%M:%S").to_string(),
            latitude: coords.latitude,
            longitude: coords.longitude,
            address,
            user_name: user_name.to_string(),
            registration_code: EventId::new().receipt_code(),
            photo_uri: None,
        };

        let mut points = vec![point.clone()];
        points.extend(load_points(store)?);
        points.truncate(limit.max(1));
        save_points(store, &points)?;

        audit_quietly(
            store,
            "point",
            &point.timestamp,
            &format!("legacy point {}", point.registration_code),
        );

        Ok(point)
    }

    /// Turn parseable points into punches. Within each day, directions
    /// alternate IN/OUT in chronological order.
    pub fn convert(points: &[LegacyPoint]) -> (Vec<ClockEvent>, Vec<String>) {
        let mut skipped = Vec::new();
        let mut by_date: BTreeMap<NaiveDate, Vec<(DateTime<FixedOffset>, &LegacyPoint)>> =
            BTreeMap::new();

        for p in points {
            match p.parsed_timestamp() {
                Some(ts) => by_date.entry(ts.date_naive()).or_default().push((ts, p)),
                None => skipped.push(p.timestamp.clone()),
            }
        }

        let mut events = Vec::new();
        for (_, mut day) in by_date {
            day.sort_by_key(|(ts, _)| *ts);
            let mut kind = EventKind::In;
            for (ts, p) in day {
                let mut ev = ClockEvent::new(
                    kind,
                    ts,
                    Coordinates::new(p.latitude, p.longitude),
                    p.address.clone(),
                );
                ev.photo_uri = p.photo_uri.clone();
                events.push(ev);
                kind = kind.flip();
            }
        }

        (events, skipped)
    }

    /// One-time migration of `points` into `timeEntries`. The legacy key is
    /// removed afterwards, so running it twice is a no-op.
    pub fn migrate<S>(store: &mut S, ledger: &DayLedger) -> AppResult<MigrationReport>
    where
        S: KeyValueStore + ?Sized,
    {
        if !has_points(store)? {
            return Ok(MigrationReport {
                already_done: true,
                ..Default::default()
            });
        }

        let points = load_points(store)?;
        let (converted, skipped) = Self::convert(&points);
        let migrated = converted.len();

        let existing = load_days(store, ledger)?;
        let merged = ledger.group_and_balance(
            existing
                .iter()
                .flat_map(|d| d.entries().iter().cloned())
                .chain(converted),
        );

        save_days(store, &merged)?;
        remove_points(store)?;

        audit_quietly(
            store,
            "migrate_legacy",
            "points",
            &format!(
                "{} points migrated, {} skipped at {}",
                migrated,
                skipped.len(),
                Local::now().to_rfc3339()
            ),
        );

        Ok(MigrationReport {
            migrated,
            skipped,
            already_done: false,
        })
    }
}
