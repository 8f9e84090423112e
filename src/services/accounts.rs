//! Account Operations
//!
//! User lifecycle, credential checks, sessions, and purchase/attempt
//! accounting. Attempt decrements are read-modify-write sequences and run
//! entirely inside one `&mut self` call, so they cannot lose updates.

use std::collections::BTreeMap;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::{AssessmentType, Purchase, Session, User};
use crate::services::{AttemptCounts, Services};

impl Services {
    // == Create User ==
    /// Registers a new account with a bcrypt-hashed password.
    pub fn create_user(&mut self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        if self.users.get_item(email).is_some() {
            return Err(AppError::Validation(format!(
                "An account already exists for {email}"
            )));
        }

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        let user = User::new(email, password_hash);
        self.users.put_item(user.clone())?;
        info!(email, "user created");
        Ok(user)
    }

    // == Verify Credentials ==
    /// Checks email/password and records the login time on success.
    ///
    /// A wrong password and an unknown email both return None; callers
    /// cannot distinguish the two.
    pub fn verify_credentials(&mut self, email: &str, password: &str) -> Option<User> {
        let user = self.users.get_item(email)?;

        if !verify(password, &user.password_hash).unwrap_or(false) {
            warn!(email, "failed login attempt");
            return None;
        }

        self.users.update_item(email, |user| {
            user.last_login = Some(crate::models::now_rfc3339());
        });
        self.users.get_item(email)
    }

    // == Sessions ==
    /// Opens a session for an existing user.
    pub fn create_session(&mut self, user_email: &str) -> Result<Session> {
        if self.users.get_item(user_email).is_none() {
            return Err(AppError::NotFound(format!("No account for {user_email}")));
        }

        let session = Session::new(user_email);
        self.sessions.set(session.clone(), None)?;
        Ok(session)
    }

    pub fn get_session(&mut self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id)
    }

    pub fn delete_session(&mut self, session_id: &str) -> bool {
        self.sessions.delete(session_id)
    }

    /// Remaining session lifetime in seconds; -1 when absent or expired.
    pub fn session_ttl(&mut self, session_id: &str) -> i64 {
        self.sessions.ttl(session_id)
    }

    // == Purchases ==
    /// Records a purchase, granting the standard number of attempts.
    pub fn add_purchase(&mut self, email: &str, product_id: &str) -> Result<Purchase> {
        let kind = AssessmentType::from_product_id(product_id).ok_or_else(|| {
            AppError::Validation(format!("Unknown product id: {product_id}"))
        })?;

        if self.users.get_item(email).is_none() {
            return Err(AppError::NotFound(format!("No account for {email}")));
        }

        let purchase = Purchase::new(product_id, kind);
        let recorded = purchase.clone();
        self.users.update_item(email, |user| {
            user.purchases.push(purchase);
        });

        info!(email, product_id, kind = %kind, "purchase recorded");
        Ok(recorded)
    }

    // == Use Attempt ==
    /// Consumes one attempt for the assessment type. Returns false when
    /// the user, the purchase, or a remaining attempt is missing; counters
    /// are left unchanged in every failure case.
    pub fn use_assessment_attempt(&mut self, email: &str, kind: AssessmentType) -> bool {
        let mut used = false;
        self.users.update_item(email, |user| {
            if let Some(purchase) = user.purchase_for_mut(kind) {
                used = purchase.use_attempt();
            }
        });

        if used {
            info!(email, kind = %kind, "assessment attempt consumed");
        }
        used
    }

    /// Whether an account exists for this email.
    pub fn user_exists(&mut self, email: &str) -> bool {
        self.users.get_item(email).is_some()
    }

    // == Attempt Counts ==
    /// Per-type attempt counters for everything the user has purchased.
    pub fn assessment_counts(&mut self, email: &str) -> Result<BTreeMap<String, AttemptCounts>> {
        let user = self
            .users
            .get_item(email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let counts = user
            .purchases
            .iter()
            .map(|purchase| {
                (
                    purchase.assessment_type.as_str().to_string(),
                    AttemptCounts {
                        remaining: purchase.assessments_remaining,
                        used: purchase.assessments_used,
                        total: purchase.total_attempts(),
                        purchased_at: purchase.purchase_date.clone(),
                        last_used: purchase.last_used.clone(),
                    },
                )
            })
            .collect();
        Ok(counts)
    }

    /// Whether the user still has attempts left for this type.
    pub fn has_assessment_access(&mut self, email: &str, kind: AssessmentType) -> bool {
        self.users
            .get_item(email)
            .and_then(|user| user.purchase_for(kind).map(|p| p.assessments_remaining > 0))
            .unwrap_or(false)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tests::services;

    #[test]
    fn test_create_and_verify_user() {
        let mut services = services();

        services.create_user("a@b.com", "pw123").unwrap();

        let user = services.verify_credentials("a@b.com", "pw123").unwrap();
        assert_eq!(user.email, "a@b.com");
        assert!(user.last_login.is_some());

        assert!(services.verify_credentials("a@b.com", "wrong").is_none());
        assert!(services.verify_credentials("nobody@b.com", "pw123").is_none());
    }

    #[test]
    fn test_create_user_requires_fields() {
        let mut services = services();

        let result = services.create_user("", "pw");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut services = services();

        services.create_user("a@b.com", "pw123").unwrap();
        let result = services.create_user("a@b.com", "other");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let mut services = services();
        let user = services.create_user("a@b.com", "pw123").unwrap();

        assert_ne!(user.password_hash, "pw123");
        assert!(user.password_hash.starts_with("$2"));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut services = services();
        services.create_user("a@b.com", "pw123").unwrap();

        let session = services.create_session("a@b.com").unwrap();
        assert!(services.get_session(&session.session_id).is_some());
        assert!(services.session_ttl(&session.session_id) > 0);

        assert!(services.delete_session(&session.session_id));
        assert!(services.get_session(&session.session_id).is_none());
        assert_eq!(services.session_ttl(&session.session_id), -1);
    }

    #[test]
    fn test_session_requires_account() {
        let mut services = services();
        let result = services.create_session("ghost@b.com");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_purchase_grants_attempts() {
        let mut services = services();
        services.create_user("a@b.com", "pw123").unwrap();

        let purchase = services.add_purchase("a@b.com", "academic-writing").unwrap();
        assert_eq!(purchase.assessments_remaining, 4);

        let counts = services.assessment_counts("a@b.com").unwrap();
        assert_eq!(counts["academic_writing"].remaining, 4);
        assert_eq!(counts["academic_writing"].used, 0);
        assert!(services.has_assessment_access("a@b.com", AssessmentType::AcademicWriting));
        assert!(!services.has_assessment_access("a@b.com", AssessmentType::GeneralSpeaking));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let mut services = services();
        services.create_user("a@b.com", "pw123").unwrap();

        let result = services.add_purchase("a@b.com", "reading-comprehension");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_attempt_counters() {
        let mut services = services();
        services.create_user("a@b.com", "pw123").unwrap();
        services.add_purchase("a@b.com", "general-speaking").unwrap();

        for n in 1..=4u32 {
            assert!(services.use_assessment_attempt("a@b.com", AssessmentType::GeneralSpeaking));
            let counts = services.assessment_counts("a@b.com").unwrap();
            assert_eq!(counts["general_speaking"].remaining, 4 - n);
            assert_eq!(counts["general_speaking"].used, n);
        }

        // Exhausted: the fifth call fails and changes nothing
        assert!(!services.use_assessment_attempt("a@b.com", AssessmentType::GeneralSpeaking));
        let counts = services.assessment_counts("a@b.com").unwrap();
        assert_eq!(counts["general_speaking"].remaining, 0);
        assert_eq!(counts["general_speaking"].used, 4);
    }

    #[test]
    fn test_attempt_without_purchase_fails() {
        let mut services = services();
        services.create_user("a@b.com", "pw123").unwrap();

        assert!(!services.use_assessment_attempt("a@b.com", AssessmentType::AcademicWriting));
    }
}
