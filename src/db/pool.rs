//! SQLite-backed key-value store (lightweight for CLI usage).

use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database and bring the schema up to date.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for DbPool {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::audit(&self.conn, operation, target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrite_remove() {
        let mut pool = DbPool::in_memory().unwrap();
        assert_eq!(pool.get("timeEntries").unwrap(), None);

        pool.set("timeEntries", "[]").unwrap();
        pool.set("timeEntries", "[1]").unwrap();
        assert_eq!(pool.get("timeEntries").unwrap().as_deref(), Some("[1]"));
        assert_eq!(pool.keys().unwrap(), vec!["timeEntries".to_string()]);

        pool.remove("timeEntries").unwrap();
        assert_eq!(pool.get("timeEntries").unwrap(), None);
    }

    #[test]
    fn audit_lands_in_log_table() {
        let mut pool = DbPool::in_memory().unwrap();
        pool.audit("punch", "2025-03-10", "in at 08:00").unwrap();

        let count: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'punch'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
