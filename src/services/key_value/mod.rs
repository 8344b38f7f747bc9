//! Key-value persistence port for small pieces of view state
//! (scroll offset, selected date).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;

use crate::services::database::Database;
use crate::utils::date::{format_iso_date, parse_iso_date};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store, used in tests and when no database is available.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RefCell<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store backed by the `view_state` table.
pub struct SqliteKeyValueStore {
    db: Rc<Database>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Rc<Database>) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .connection()
            .query_row("SELECT value FROM view_state WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .context(format!("Failed to read view state {}", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .connection()
            .execute(
                "INSERT INTO view_state (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
                [key, value],
            )
            .context(format!("Failed to write view state {}", key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .connection()
            .execute("DELETE FROM view_state WHERE key = ?", [key])
            .context(format!("Failed to remove view state {}", key))?;
        Ok(())
    }
}

/// Remembers the date the day view was showing.
pub struct SelectedDateMemory {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl SelectedDateMemory {
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored date, or `fallback` when nothing usable is stored.
    pub fn load_or(&self, fallback: NaiveDate) -> NaiveDate {
        match self.store.get(&self.key) {
            Ok(Some(value)) => parse_iso_date(&value).unwrap_or_else(|| {
                log::warn!("Ignoring corrupt selected date {:?}", value);
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Failed to read selected date: {:#}", e);
                fallback
            }
        }
    }

    pub fn save(&self, date: NaiveDate) {
        if let Err(e) = self.store.set(&self.key, &format_iso_date(date)) {
            log::warn!("Failed to persist selected date: {:#}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::warn!("Failed to clear selected date: {:#}", e);
        }
    }
}
