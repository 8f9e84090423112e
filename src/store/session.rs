//! Session Cache Module
//!
//! Cache facade over a [`TtlStore`] for login sessions. Every operation
//! triggers the shared expiry sweep, so an expired session is never
//! observed as present.

use crate::error::Result;
use crate::models::Session;
use crate::store::ttl::TtlStore;

/// Default session lifetime in seconds.
pub const DEFAULT_SESSION_TTL: u64 = 3600;

// == Session Cache ==
#[derive(Debug)]
pub struct SessionCache {
    store: TtlStore<Session>,
    default_ttl: u64,
}

impl SessionCache {
    // == Constructor ==
    pub fn new(default_ttl: u64) -> Self {
        Self {
            store: TtlStore::new("sessions"),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a session under its id, expiring after the default TTL
    /// unless an explicit one is given.
    pub fn set(&mut self, session: Session, ttl_secs: Option<u64>) -> Result<()> {
        let key = session.session_id.clone();
        let ttl = ttl_secs.unwrap_or(self.default_ttl);
        self.store.put(&key, session, Some(ttl))
    }

    // == Get ==
    /// Live session for the id, or None.
    pub fn get(&mut self, session_id: &str) -> Option<Session> {
        self.store.get(session_id)
    }

    // == Delete ==
    /// Removes a session; false when absent or already expired.
    pub fn delete(&mut self, session_id: &str) -> bool {
        self.store.sweep();
        self.store.delete(session_id)
    }

    // == Exists ==
    pub fn exists(&mut self, session_id: &str) -> bool {
        self.store.get(session_id).is_some()
    }

    // == TTL ==
    /// Remaining lifetime in seconds, or -1 when the session is absent or
    /// already expired.
    pub fn ttl(&mut self, session_id: &str) -> i64 {
        match self.store.ttl_remaining(session_id) {
            Some(remaining) => remaining as i64,
            None => -1,
        }
    }

    /// Drops every session belonging to the given user; returns how many
    /// were removed. Used by account deletion.
    pub fn delete_for_user(&mut self, user_email: &str) -> usize {
        let ids = self
            .store
            .keys_where(|session| session.user_email == user_email);
        let count = ids.len();
        for id in ids {
            self.store.delete(&id);
        }
        count
    }

    // == Maintenance ==
    pub fn sweep(&mut self) -> usize {
        self.store.sweep()
    }

    /// Number of sessions currently held.
    pub fn active(&self) -> usize {
        self.store.len()
    }
}
