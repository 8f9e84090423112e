//! Assessment Operations
//!
//! Question selection, submission scoring, result storage, and the
//! history/profile read paths. A submission is scored, stored, and its
//! attempt consumed inside a single `&mut self` call so the counters can
//! never drift from the stored results.

use rand::seq::SliceRandom;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{AssessmentResult, AssessmentType, Rubric};
use crate::scoring;
use crate::services::{question_bank, Question, Services, UserProfile};

impl Services {
    // == Unique Question ==
    /// Picks a question the user has not completed for this type. When
    /// every question has been used, the full bank becomes eligible again.
    pub fn unique_question(&mut self, email: &str, kind: AssessmentType) -> Result<Question> {
        let user = self
            .users
            .get_item(email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let bank = question_bank(kind);
        let used = user.used_question_ids(kind);
        let fresh: Vec<&Question> = bank
            .iter()
            .filter(|q| !used.contains(&q.question_id.as_str()))
            .collect();

        let pool: Vec<&Question> = if fresh.is_empty() {
            bank.iter().collect()
        } else {
            fresh
        };

        pool.choose(&mut rand::thread_rng())
            .map(|q| (*q).clone())
            .ok_or_else(|| AppError::Internal(format!("empty question bank for {kind}")))
    }

    /// Records that the user has completed a question.
    pub fn mark_question_used(&mut self, email: &str, kind: AssessmentType, question_id: &str) -> bool {
        self.users
            .update_item(email, |user| user.mark_question_used(kind, question_id))
    }

    // == Submit ==
    /// Scores a submission, stores the result, consumes an attempt, and
    /// marks the question used. Returns the stored result and the
    /// attempts remaining for this type.
    pub fn submit_assessment(
        &mut self,
        email: &str,
        kind: AssessmentType,
        question_id: &str,
        text: &str,
    ) -> Result<(AssessmentResult, u32)> {
        let user = self
            .users
            .get_item(email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let has_attempt = user
            .purchase_for(kind)
            .map(|p| p.assessments_remaining > 0)
            .unwrap_or(false);
        if !has_attempt {
            return Err(AppError::Validation(format!(
                "No assessment attempts remaining for {kind}"
            )));
        }

        let prompt = question_bank(kind)
            .into_iter()
            .find(|q| q.question_id == question_id)
            .map(|q| q.prompt);

        let breakdown = scoring::assess(text, kind, prompt.as_deref(), &self.scoring);
        let result = AssessmentResult {
            assessment_id: uuid::Uuid::new_v4().to_string(),
            user_email: email.to_string(),
            assessment_type: kind,
            question_id: question_id.to_string(),
            overall_band: breakdown.overall_band,
            criteria_scores: breakdown.scores_map(),
            feedback: breakdown.feedback,
            strengths: breakdown.strengths,
            improvements: breakdown.improvements,
            timestamp: crate::models::now_rfc3339(),
        };

        self.results.put_item(result.clone())?;
        self.use_assessment_attempt(email, kind);
        self.mark_question_used(email, kind, question_id);

        let remaining = self
            .assessment_counts(email)
            .ok()
            .and_then(|counts| counts.get(kind.as_str()).map(|c| c.remaining))
            .unwrap_or(0);

        info!(
            email,
            kind = %kind,
            question_id,
            overall_band = result.overall_band,
            remaining,
            "assessment scored"
        );
        Ok((result, remaining))
    }

    // == History ==
    /// All stored results for a user, newest first.
    pub fn assessment_history(&mut self, email: &str) -> Vec<AssessmentResult> {
        let mut results = self.results.scan_filter(|r| r.user_email == email);
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results
    }

    // == Profile ==
    /// Profile view for an existing user.
    pub fn user_profile(&mut self, email: &str) -> Result<UserProfile> {
        let user = self
            .users
            .get_item(email)
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let total_attempts_used = user.purchases.iter().map(|p| p.assessments_used).sum();
        let username = email.split('@').next().unwrap_or(email).to_string();

        Ok(UserProfile {
            email: user.email.clone(),
            username,
            created_at: user.created_at.clone(),
            last_login: user.last_login.clone(),
            total_attempts_used,
            completed_assessments: user.completed_assessments.len(),
            account_status: "active".to_string(),
        })
    }

    // == Rubrics ==
    /// Examiner rubric for one assessment type.
    pub fn assessment_rubric(&mut self, kind: AssessmentType) -> Option<Rubric> {
        self.rubrics.get_item(kind.as_str())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tests::services;

    fn user_with_purchase(services: &mut Services, product: &str) {
        services.create_user("a@b.com", "pw123").unwrap();
        services.add_purchase("a@b.com", product).unwrap();
    }

    #[test]
    fn test_unique_question_avoids_completed() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");
        let kind = AssessmentType::AcademicWriting;

        let bank = question_bank(kind);
        // Complete all but one question
        for question in bank.iter().take(bank.len() - 1) {
            services.mark_question_used("a@b.com", kind, &question.question_id);
        }

        let picked = services.unique_question("a@b.com", kind).unwrap();
        assert_eq!(picked.question_id, bank.last().unwrap().question_id);
    }

    #[test]
    fn test_exhausted_bank_becomes_eligible_again() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");
        let kind = AssessmentType::AcademicWriting;

        for question in question_bank(kind) {
            services.mark_question_used("a@b.com", kind, &question.question_id);
        }

        // Every question used: selection still succeeds
        let picked = services.unique_question("a@b.com", kind).unwrap();
        assert_eq!(picked.assessment_type, kind);
    }

    #[test]
    fn test_unique_question_unknown_user() {
        let mut services = services();
        let result = services.unique_question("ghost@b.com", AssessmentType::AcademicWriting);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_submit_scores_and_consumes_attempt() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");
        let kind = AssessmentType::AcademicWriting;

        let (result, remaining) = services
            .submit_assessment(
                "a@b.com",
                kind,
                "aw_task2_001",
                "Universities should offer broad courses. However, depth matters too.",
            )
            .unwrap();

        assert_eq!(remaining, 3);
        assert_eq!(result.user_email, "a@b.com");
        assert_eq!(result.criteria_scores.len(), 4);
        assert!(result.overall_band >= 6.0 && result.overall_band <= 9.0);

        // Result stored and readable back
        let history = services.assessment_history("a@b.com");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].assessment_id, result.assessment_id);

        // Question marked used
        let user_questions = services.unique_question("a@b.com", kind).unwrap();
        assert_ne!(user_questions.question_id, "aw_task2_001");
    }

    #[test]
    fn test_submit_without_attempts_fails_cleanly() {
        let mut services = services();
        user_with_purchase(&mut services, "general-writing");
        let kind = AssessmentType::GeneralWriting;

        for _ in 0..4 {
            services
                .submit_assessment("a@b.com", kind, "gw_task1_001", "Dear manager, the kettle broke.")
                .unwrap();
        }

        let result = services.submit_assessment("a@b.com", kind, "gw_task1_001", "one more");
        assert!(matches!(result, Err(AppError::Validation(_))));

        // Counters unchanged and history still holds exactly four results
        let counts = services.assessment_counts("a@b.com").unwrap();
        assert_eq!(counts["general_writing"].remaining, 0);
        assert_eq!(counts["general_writing"].used, 4);
        assert_eq!(services.assessment_history("a@b.com").len(), 4);
    }

    #[test]
    fn test_submit_requires_purchase_of_matching_type() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");

        let result = services.submit_assessment(
            "a@b.com",
            AssessmentType::GeneralSpeaking,
            "gs_complete_001",
            "some spoken answer transcript",
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_history_newest_first() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");
        let kind = AssessmentType::AcademicWriting;

        services
            .submit_assessment("a@b.com", kind, "aw_task2_001", "First essay.")
            .unwrap();
        services
            .submit_assessment("a@b.com", kind, "aw_task2_002", "Second essay.")
            .unwrap();

        let history = services.assessment_history("a@b.com");
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp >= history[1].timestamp);
    }

    #[test]
    fn test_profile_reflects_usage() {
        let mut services = services();
        user_with_purchase(&mut services, "academic-writing");

        services
            .submit_assessment(
                "a@b.com",
                AssessmentType::AcademicWriting,
                "aw_task2_001",
                "An essay.",
            )
            .unwrap();

        let profile = services.user_profile("a@b.com").unwrap();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.username, "a");
        assert_eq!(profile.total_attempts_used, 1);
        assert_eq!(profile.completed_assessments, 1);
        assert_eq!(profile.account_status, "active");
    }

    #[test]
    fn test_profile_unknown_user() {
        let mut services = services();
        let result = services.user_profile("ghost@b.com");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_rubric_lookup() {
        let mut services = services();

        let rubric = services
            .assessment_rubric(AssessmentType::AcademicSpeaking)
            .unwrap();
        assert_eq!(rubric.assessment_type, "academic_speaking");
        assert!(rubric.examiner_prompt.contains("Maya"));
    }
}
