//! Table Facade Module
//!
//! Typed wrapper over a [`TtlStore`] exposing DynamoDB-style item
//! operations. Each table owns exactly one record type and one designated
//! primary-key attribute, fixed at construction; the record supplies its
//! own key through [`TableRecord`].

use crate::error::{AppError, Result};
use crate::store::ttl::TtlStore;

// == Table Record ==
/// A record that can live in a [`Table`].
pub trait TableRecord: Clone {
    /// Value of the record's primary-key attribute.
    fn primary_key(&self) -> &str;

    /// Optional absolute expiry (Unix seconds) carried by the record.
    fn expires_at(&self) -> Option<u64> {
        None
    }
}

// == Table ==
/// A named table of typed records.
#[derive(Debug)]
pub struct Table<T: TableRecord> {
    /// Name of the primary-key attribute, for diagnostics
    key_attr: &'static str,
    store: TtlStore<T>,
}

impl<T: TableRecord> Table<T> {
    // == Constructor ==
    /// Creates an empty table. `key_attr` names the primary-key attribute
    /// callers must populate in every record.
    pub fn new(name: &'static str, key_attr: &'static str) -> Self {
        Self {
            key_attr,
            store: TtlStore::new(name),
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        self.store.name()
    }

    // == Put Item ==
    /// Inserts or overwrites a record under its own primary key.
    ///
    /// A record with an empty key attribute is a validation error.
    pub fn put_item(&mut self, item: T) -> Result<()> {
        let key = item.primary_key().to_string();
        if key.is_empty() {
            return Err(AppError::Validation(format!(
                "{}: record is missing its {} attribute",
                self.name(),
                self.key_attr
            )));
        }
        let expires_at = item.expires_at();
        self.store.put_at(&key, item, expires_at)
    }

    // == Get Item ==
    /// Retrieves a record; None for unknown or expired keys.
    pub fn get_item(&mut self, key: &str) -> Option<T> {
        self.store.get(key)
    }

    // == Delete Item ==
    /// Removes a record; false if the key is absent.
    pub fn delete_item(&mut self, key: &str) -> bool {
        self.store.delete(key)
    }

    // == Update Item ==
    /// Applies a partial mutation to an existing record.
    ///
    /// No-op returning false when the key is absent. The whole mutation is
    /// one critical section under the owning lock, so read-modify-write
    /// sequences cannot lose updates.
    pub fn update_item<F>(&mut self, key: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        self.store.update(key, mutate)
    }

    // == Scan ==
    /// All live records, unordered.
    pub fn scan(&mut self) -> Vec<T> {
        self.store.scan()
    }

    /// Live records matching an equality-style predicate, unordered.
    pub fn scan_filter<F>(&mut self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.store.scan_filter(predicate)
    }

    // == Maintenance ==
    /// Drops expired records; returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        self.store.sweep()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
