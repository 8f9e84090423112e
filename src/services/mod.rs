//! Services Module
//!
//! The backend's state aggregate: every table, the session cache, the
//! question bank, and the scoring configuration, constructed explicitly at
//! process start and injected into handlers through [`crate::api::AppState`].
//! There is no process-global store; everything reaches state through this
//! struct, and every mutating operation runs as one critical section under
//! the owning lock.

mod accounts;
mod assessments;
mod privacy;
mod questions;
mod rubrics;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{
    AssessmentResult, ConsentRecord, CookiePreferences, DataRequest, Rubric, User,
};
use crate::scoring::ScoringConfig;
use crate::store::{SessionCache, Table};

pub use questions::{question_bank, Question, SpeakingPart};
pub use rubrics::default_rubrics;

// == Services ==
#[derive(Debug)]
pub struct Services {
    users: Table<User>,
    results: Table<AssessmentResult>,
    rubrics: Table<Rubric>,
    consents: Table<ConsentRecord>,
    cookie_prefs: Table<CookiePreferences>,
    data_requests: Table<DataRequest>,
    sessions: SessionCache,
    scoring: ScoringConfig,
}

impl Services {
    // == Constructor ==
    /// Builds the full state aggregate and seeds the rubrics table.
    pub fn new(session_ttl: u64, scoring: ScoringConfig) -> Self {
        let mut services = Self {
            users: Table::new("users", "email"),
            results: Table::new("assessment-results", "assessment_id"),
            rubrics: Table::new("assessment-rubrics", "assessment_type"),
            consents: Table::new("gdpr-consents", "user_email"),
            cookie_prefs: Table::new("cookie-preferences", "user_email"),
            data_requests: Table::new("gdpr-data-requests", "request_id"),
            sessions: SessionCache::new(session_ttl),
            scoring,
        };

        for rubric in default_rubrics() {
            // Seeded rubrics are static data; insertion cannot fail
            if let Err(error) = services.rubrics.put_item(rubric) {
                tracing::error!(%error, "failed to seed rubric");
            }
        }

        services
    }

    /// Scoring configuration in use.
    pub fn scoring_config(&self) -> &ScoringConfig {
        &self.scoring
    }

    // == Maintenance ==
    /// Sweeps expired entries from every table and the session cache.
    /// Returns the total number of entries removed.
    pub fn sweep_all(&mut self) -> usize {
        self.users.sweep()
            + self.results.sweep()
            + self.rubrics.sweep()
            + self.consents.sweep()
            + self.cookie_prefs.sweep()
            + self.data_requests.sweep()
            + self.sessions.sweep()
    }

    // == Health ==
    /// Current table sizes and session count.
    pub fn health_snapshot(&self) -> HealthSnapshot {
        let mut tables = BTreeMap::new();
        tables.insert("users".to_string(), self.users.len());
        tables.insert("assessment_results".to_string(), self.results.len());
        tables.insert("assessment_rubrics".to_string(), self.rubrics.len());
        tables.insert("gdpr_consents".to_string(), self.consents.len());
        tables.insert("cookie_preferences".to_string(), self.cookie_prefs.len());
        tables.insert("gdpr_data_requests".to_string(), self.data_requests.len());

        HealthSnapshot {
            tables,
            active_sessions: self.sessions.active(),
        }
    }
}

// == Health Snapshot ==
/// Point-in-time view of store occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub tables: BTreeMap<String, usize>,
    pub active_sessions: usize,
}

// == Attempt Counts ==
/// Remaining/used attempt counters for one purchased assessment type.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptCounts {
    pub remaining: u32,
    pub used: u32,
    pub total: u32,
    pub purchased_at: String,
    pub last_used: Option<String>,
}

// == User Profile ==
/// Profile view assembled from the user record.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub last_login: Option<String>,
    pub total_attempts_used: u32,
    pub completed_assessments: usize,
    pub account_status: String,
}

// == Deletion Report ==
/// What an account deletion removed, beyond the user record itself.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionReport {
    pub results_deleted: usize,
    pub data_requests_deleted: usize,
    pub sessions_deleted: usize,
}
