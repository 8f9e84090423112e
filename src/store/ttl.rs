//! TTL Store Module
//!
//! Generic ephemeral associative storage with lazy expiry. Each table and
//! the session cache wrap one of these. Expired entries are swept on every
//! read, scan, and write; there is no background thread inside the store.
//!
//! Not safe for concurrent mutation on its own; the owning state wraps it
//! behind a lock.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::store::entry::StoredEntry;

// == TTL Store ==
/// Key-to-record map with absolute-epoch expiry.
#[derive(Debug)]
pub struct TtlStore<T> {
    /// Store name, used for log context
    name: String,
    /// Key-value storage
    entries: HashMap<String, StoredEntry<T>>,
}

impl<T: Clone> TtlStore<T> {
    // == Constructor ==
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Put ==
    /// Inserts or overwrites a record, expiring `ttl_secs` from now.
    ///
    /// Always succeeds for a non-empty key; an empty key is a validation
    /// error.
    pub fn put(&mut self, key: &str, value: T, ttl_secs: Option<u64>) -> Result<()> {
        self.put_entry(key, StoredEntry::new(value, ttl_secs))
    }

    /// Inserts or overwrites a record with an absolute expiry timestamp.
    pub fn put_at(&mut self, key: &str, value: T, expires_at: Option<u64>) -> Result<()> {
        self.put_entry(key, StoredEntry::with_expiry(value, expires_at))
    }

    fn put_entry(&mut self, key: &str, entry: StoredEntry<T>) -> Result<()> {
        if key.is_empty() {
            return Err(AppError::Validation(format!(
                "{}: key must not be empty",
                self.name
            )));
        }

        self.sweep();
        self.entries.insert(key.to_string(), entry);
        tracing::debug!(store = %self.name, key, "put");
        Ok(())
    }

    // == Get ==
    /// Retrieves a record by key.
    ///
    /// Missing and expired keys both return None; absence is a normal
    /// return value, not an error.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.sweep();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Applies a mutation to the record under `key`, if present and live.
    ///
    /// Returns false without calling the mutator when the key is absent.
    pub fn update<F>(&mut self, key: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        self.sweep();
        match self.entries.get_mut(key) {
            Some(entry) => {
                mutate(&mut entry.value);
                true
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes a key if present. Deleting an absent key returns false
    /// without error.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            tracing::debug!(store = %self.name, key, "delete");
        }
        removed
    }

    // == Scan ==
    /// Returns all live records, unordered.
    pub fn scan(&mut self) -> Vec<T> {
        self.sweep();
        self.entries
            .values()
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Returns all live records matching the predicate, unordered.
    pub fn scan_filter<F>(&mut self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.sweep();
        self.entries
            .values()
            .filter(|entry| predicate(&entry.value))
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Returns the live keys matching the predicate, unordered.
    pub fn keys_where<F>(&mut self, predicate: F) -> Vec<String>
    where
        F: Fn(&T) -> bool,
    {
        self.sweep();
        self.entries
            .iter()
            .filter(|(_, entry)| predicate(&entry.value))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == TTL ==
    /// Remaining TTL in seconds for a live key; None when the key is
    /// absent, expired, or has no expiry.
    pub fn ttl_remaining(&mut self, key: &str) -> Option<u64> {
        self.sweep();
        self.entries.get(key).and_then(|entry| entry.ttl_remaining())
    }

    // == Sweep ==
    /// Removes all expired entries; returns how many were dropped.
    pub fn sweep(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
            tracing::debug!(store = %self.name, key, "ttl expired");
        }
        count
    }

    // == Length ==
    /// Number of entries currently held, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
