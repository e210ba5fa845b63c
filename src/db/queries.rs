//! Whole-list JSON reads and writes on top of the key-value store.

use crate::core::ledger::DayLedger;
use crate::db::store::{KEY_ADJUSTMENTS, KEY_POINTS, KEY_TIME_ENTRIES, KeyValueStore};
use crate::errors::{AppError, AppResult};
use crate::models::adjustment::AdjustmentRequest;
use crate::models::day_record::DayRecord;
use crate::models::legacy_point::LegacyPoint;
use serde::Serialize;
use serde::de::DeserializeOwned;

fn read_list<S, T>(store: &S, key: &str) -> AppResult<Vec<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store
        .get(key)
        .map_err(|e| AppError::StorageReadWriteFailed(format!("read '{key}': {e}")))?;

    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(&s)
            .map_err(|e| AppError::StorageReadWriteFailed(format!("parse '{key}': {e}"))),
    }
}

fn write_list<S, T>(store: &mut S, key: &str, items: &[T]) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(items)
        .map_err(|e| AppError::StorageReadWriteFailed(format!("encode '{key}': {e}")))?;

    store
        .set(key, &json)
        .map_err(|e| AppError::StorageReadWriteFailed(format!("write '{key}': {e}")))
}

/// Load the day records. Stored balances are not trusted: every record is
/// regrouped and recomputed with the configured workday.
pub fn load_days<S>(store: &S, ledger: &DayLedger) -> AppResult<Vec<DayRecord>>
where
    S: KeyValueStore + ?Sized,
{
    let stored: Vec<DayRecord> = read_list(store, KEY_TIME_ENTRIES)?;
    Ok(ledger.regroup(&stored))
}

pub fn save_days<S>(store: &mut S, days: &[DayRecord]) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
{
    write_list(store, KEY_TIME_ENTRIES, days)
}

pub fn load_points<S>(store: &S) -> AppResult<Vec<LegacyPoint>>
where
    S: KeyValueStore + ?Sized,
{
    read_list(store, KEY_POINTS)
}

pub fn save_points<S>(store: &mut S, points: &[LegacyPoint]) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
{
    write_list(store, KEY_POINTS, points)
}

pub fn has_points<S>(store: &S) -> AppResult<bool>
where
    S: KeyValueStore + ?Sized,
{
    Ok(store.get(KEY_POINTS)?.is_some())
}

pub fn remove_points<S>(store: &mut S) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
{
    store
        .remove(KEY_POINTS)
        .map_err(|e| AppError::StorageReadWriteFailed(format!("remove '{KEY_POINTS}': {e}")))
}

pub fn load_adjustments<S>(store: &S) -> AppResult<Vec<AdjustmentRequest>>
where
    S: KeyValueStore + ?Sized,
{
    read_list(store, KEY_ADJUSTMENTS)
}

pub fn save_adjustments<S>(store: &mut S, requests: &[AdjustmentRequest]) -> AppResult<()>
where
    S: KeyValueStore + ?Sized,
{
    write_list(store, KEY_ADJUSTMENTS, requests)
}
