//! Stored Entry Module
//!
//! Defines the envelope for individual store entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Entry ==
/// A value held by the store together with its expiry metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry<T> {
    /// The stored record
    pub value: T,
    /// Insertion timestamp (Unix seconds)
    pub created_at: u64,
    /// Absolute expiry timestamp (Unix seconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<T> StoredEntry<T> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_secs` from now (never, if None).
    pub fn new(value: T, ttl_secs: Option<u64>) -> Self {
        let now = now_epoch_secs();
        Self {
            value,
            created_at: now,
            expires_at: ttl_secs.map(|ttl| now + ttl),
        }
    }

    /// Creates a new entry with an absolute expiry timestamp.
    ///
    /// Records carry their expiry as absolute epoch seconds; a timestamp
    /// already in the past yields an entry that is expired immediately.
    pub fn with_expiry(value: T, expires_at: Option<u64>) -> Self {
        Self {
            value,
            created_at: now_epoch_secs(),
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant
    /// (`now >= expires_at`). Entries without expiry never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => now_epoch_secs() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining TTL in seconds, or None if no expiry is set.
    ///
    /// Returns `Some(0)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(now_epoch_secs()))
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in seconds.
pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
