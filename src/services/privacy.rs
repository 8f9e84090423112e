//! Privacy Operations
//!
//! Consent settings, cookie preferences, data export/deletion requests,
//! and the full account-deletion cascade.

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    now_rfc3339, ConsentRecord, ConsentUpdateRequest, CookiePreferences,
    CookiePreferencesUpdateRequest, DataRequest, DataRequestKind, DataRequestStatus,
};
use crate::services::{DeletionReport, Services};

/// Days between a deletion request and its scheduled execution.
const DELETION_GRACE_DAYS: i64 = 30;

impl Services {
    // == Consent ==
    /// Current consent settings; defaults when the user never saved any.
    pub fn consent(&mut self, email: &str) -> ConsentRecord {
        self.consents
            .get_item(email)
            .unwrap_or_else(|| ConsentRecord::default_for(email))
    }

    /// Applies a partial consent update over the current settings.
    pub fn update_consent(
        &mut self,
        email: &str,
        update: &ConsentUpdateRequest,
    ) -> Result<ConsentRecord> {
        let mut record = self.consent(email);

        if let Some(v) = update.data_processing {
            record.data_processing = v;
        }
        if let Some(v) = update.audio_processing {
            record.audio_processing = v;
        }
        if let Some(v) = update.marketing_emails {
            record.marketing_emails = v;
        }
        if let Some(v) = update.analytics {
            record.analytics = v;
        }
        if let Some(v) = update.third_party_sharing {
            record.third_party_sharing = v;
        }
        record.last_updated = now_rfc3339();

        self.consents.put_item(record.clone())?;
        info!(email, "consent updated");
        Ok(record)
    }

    // == Cookie Preferences ==
    pub fn cookie_preferences(&mut self, email: &str) -> CookiePreferences {
        self.cookie_prefs
            .get_item(email)
            .unwrap_or_else(|| CookiePreferences::default_for(email))
    }

    /// Applies a partial cookie-preference update. The necessary category
    /// stays enabled no matter what the caller sends.
    pub fn update_cookie_preferences(
        &mut self,
        email: &str,
        update: &CookiePreferencesUpdateRequest,
    ) -> Result<CookiePreferences> {
        let mut prefs = self.cookie_preferences(email);

        if let Some(v) = update.functional {
            prefs.functional = v;
        }
        if let Some(v) = update.analytics {
            prefs.analytics = v;
        }
        if let Some(v) = update.marketing {
            prefs.marketing = v;
        }
        prefs.necessary = true;
        prefs.last_updated = now_rfc3339();

        self.cookie_prefs.put_item(prefs.clone())?;
        info!(email, "cookie preferences updated");
        Ok(prefs)
    }

    // == Data Export ==
    /// Builds the user's data export and records the request as completed.
    pub fn request_data_export(&mut self, email: &str) -> Result<DataRequest> {
        let user = self
            .users
            .get_item(email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let history = self.assessment_history(email);
        let consent = self.consent(email);

        // Password hashes never leave the store
        let export_data = json!({
            "user_profile": {
                "email": user.email,
                "created_at": user.created_at,
                "last_login": user.last_login,
                "purchases": user.purchases,
            },
            "assessments": history,
            "consent": consent,
        });

        let request = DataRequest {
            request_id: Uuid::new_v4().to_string(),
            user_email: email.to_string(),
            request_type: DataRequestKind::DataExport,
            status: DataRequestStatus::Completed,
            created_at: now_rfc3339(),
            completed_at: Some(now_rfc3339()),
            scheduled_for: None,
            export_data: Some(export_data),
        };

        self.data_requests.put_item(request.clone())?;
        info!(email, request_id = %request.request_id, "data export completed");
        Ok(request)
    }

    // == Data Deletion ==
    /// Records a deletion request, scheduled after the grace period.
    pub fn request_data_deletion(&mut self, email: &str) -> Result<DataRequest> {
        if self.users.get_item(email).is_none() {
            return Err(AppError::NotFound(format!("No account for {email}")));
        }

        let scheduled_for = (Utc::now() + Duration::days(DELETION_GRACE_DAYS)).to_rfc3339();
        let request = DataRequest {
            request_id: Uuid::new_v4().to_string(),
            user_email: email.to_string(),
            request_type: DataRequestKind::DataDeletion,
            status: DataRequestStatus::Pending,
            created_at: now_rfc3339(),
            completed_at: None,
            scheduled_for: Some(scheduled_for),
            export_data: None,
        };

        self.data_requests.put_item(request.clone())?;
        info!(email, request_id = %request.request_id, "data deletion requested");
        Ok(request)
    }

    /// Status of a previously created request.
    pub fn data_request_status(&mut self, request_id: &str) -> Option<DataRequest> {
        self.data_requests.get_item(request_id)
    }

    /// All requests a user has filed.
    pub fn data_requests_for(&mut self, email: &str) -> Vec<DataRequest> {
        self.data_requests.scan_filter(|r| r.user_email == email)
    }

    // == Account Deletion ==
    /// Deletes the user record and everything keyed or filterable by the
    /// email: assessment results, consent, cookie preferences, data
    /// requests, and live sessions.
    pub fn delete_user_completely(&mut self, email: &str) -> Result<DeletionReport> {
        if !self.users.delete_item(email) {
            return Err(AppError::NotFound(format!("No account for {email}")));
        }

        let result_ids: Vec<String> = self
            .results
            .scan_filter(|r| r.user_email == email)
            .into_iter()
            .map(|r| r.assessment_id)
            .collect();
        let results_deleted = result_ids.len();
        for id in result_ids {
            self.results.delete_item(&id);
        }

        self.consents.delete_item(email);
        self.cookie_prefs.delete_item(email);

        let request_ids: Vec<String> = self
            .data_requests
            .scan_filter(|r| r.user_email == email)
            .into_iter()
            .map(|r| r.request_id)
            .collect();
        let data_requests_deleted = request_ids.len();
        for id in request_ids {
            self.data_requests.delete_item(&id);
        }

        let sessions_deleted = self.sessions.delete_for_user(email);

        info!(
            email,
            results_deleted, data_requests_deleted, sessions_deleted, "account deleted"
        );
        Ok(DeletionReport {
            results_deleted,
            data_requests_deleted,
            sessions_deleted,
        })
    }
}
