//! Key-value storage seen by the rest of the crate.
//!
//! Values are whole JSON blobs; every update is a read-modify-write of the
//! complete list stored under one key.

use crate::errors::AppResult;
use std::collections::BTreeMap;

/// Legacy flat point list (first iteration of the app).
pub const KEY_POINTS: &str = "points";
/// Canonical list of day records.
pub const KEY_TIME_ENTRIES: &str = "timeEntries";
/// Submitted adjustment requests.
pub const KEY_ADJUSTMENTS: &str = "adjustments";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&mut self, key: &str) -> AppResult<()>;

    fn keys(&self) -> AppResult<Vec<String>>;

    /// Record an audit line for a mutating operation. Stores without an
    /// audit trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    pub audit_trail: Vec<(String, String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.audit_trail
            .push((operation.into(), target.into(), message.into()));
        Ok(())
    }
}
