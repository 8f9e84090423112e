//! Table records for the prep backend
//!
//! One explicit struct per table, validated at the table boundary instead
//! of open-ended attribute maps. All timestamps are RFC 3339 strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::TableRecord;

// == Assessment Type ==
/// The four purchasable assessment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    AcademicWriting,
    GeneralWriting,
    AcademicSpeaking,
    GeneralSpeaking,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 4] = [
        AssessmentType::AcademicWriting,
        AssessmentType::GeneralWriting,
        AssessmentType::AcademicSpeaking,
        AssessmentType::GeneralSpeaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::AcademicWriting => "academic_writing",
            AssessmentType::GeneralWriting => "general_writing",
            AssessmentType::AcademicSpeaking => "academic_speaking",
            AssessmentType::GeneralSpeaking => "general_speaking",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "academic_writing" => Some(AssessmentType::AcademicWriting),
            "general_writing" => Some(AssessmentType::GeneralWriting),
            "academic_speaking" => Some(AssessmentType::AcademicSpeaking),
            "general_speaking" => Some(AssessmentType::GeneralSpeaking),
            _ => None,
        }
    }

    /// Maps a store product id to its assessment type. Both the kebab-case
    /// web ids and the snake_case mobile ids are accepted.
    pub fn from_product_id(product_id: &str) -> Option<Self> {
        match product_id {
            "academic-writing" | "academic_writing_assessment" => {
                Some(AssessmentType::AcademicWriting)
            }
            "general-writing" | "general_writing_assessment" => {
                Some(AssessmentType::GeneralWriting)
            }
            "academic-speaking" | "academic_speaking_assessment" => {
                Some(AssessmentType::AcademicSpeaking)
            }
            "general-speaking" | "general_speaking_assessment" => {
                Some(AssessmentType::GeneralSpeaking)
            }
            _ => None,
        }
    }

    pub fn is_writing(&self) -> bool {
        matches!(
            self,
            AssessmentType::AcademicWriting | AssessmentType::GeneralWriting
        )
    }

    pub fn is_speaking(&self) -> bool {
        !self.is_writing()
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Purchase ==
/// One purchased assessment package: four attempts per purchase.
///
/// `assessments_remaining + assessments_used` stays constant for the
/// lifetime of the purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub product_id: String,
    pub assessment_type: AssessmentType,
    pub purchase_date: String,
    pub assessments_remaining: u32,
    pub assessments_used: u32,
    pub last_used: Option<String>,
}

/// Attempts granted per purchase.
pub const ATTEMPTS_PER_PURCHASE: u32 = 4;

impl Purchase {
    pub fn new(product_id: impl Into<String>, assessment_type: AssessmentType) -> Self {
        Self {
            product_id: product_id.into(),
            assessment_type,
            purchase_date: now_rfc3339(),
            assessments_remaining: ATTEMPTS_PER_PURCHASE,
            assessments_used: 0,
            last_used: None,
        }
    }

    /// Consumes one attempt. Returns false, leaving the counters unchanged,
    /// when none remain.
    pub fn use_attempt(&mut self) -> bool {
        if self.assessments_remaining == 0 {
            return false;
        }
        self.assessments_remaining -= 1;
        self.assessments_used += 1;
        self.last_used = Some(now_rfc3339());
        true
    }

    pub fn total_attempts(&self) -> u32 {
        self.assessments_remaining + self.assessments_used
    }
}

// == Completed Assessment ==
/// Marker that a user has finished a question, used to avoid repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedAssessment {
    pub question_id: String,
    pub assessment_type: AssessmentType,
    pub completed_at: String,
}

// == User ==
/// Account record, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub user_id: String,
    pub password_hash: String,
    pub created_at: String,
    pub last_login: Option<String>,
    pub purchases: Vec<Purchase>,
    pub completed_assessments: Vec<CompletedAssessment>,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            user_id: Uuid::new_v4().to_string(),
            password_hash: password_hash.into(),
            created_at: now_rfc3339(),
            last_login: None,
            purchases: Vec::new(),
            completed_assessments: Vec::new(),
        }
    }

    pub fn purchase_for(&self, kind: AssessmentType) -> Option<&Purchase> {
        self.purchases.iter().find(|p| p.assessment_type == kind)
    }

    pub fn purchase_for_mut(&mut self, kind: AssessmentType) -> Option<&mut Purchase> {
        self.purchases
            .iter_mut()
            .find(|p| p.assessment_type == kind)
    }

    /// Question ids this user has already completed for a type.
    pub fn used_question_ids(&self, kind: AssessmentType) -> Vec<&str> {
        self.completed_assessments
            .iter()
            .filter(|c| c.assessment_type == kind)
            .map(|c| c.question_id.as_str())
            .collect()
    }

    pub fn mark_question_used(&mut self, kind: AssessmentType, question_id: impl Into<String>) {
        self.completed_assessments.push(CompletedAssessment {
            question_id: question_id.into(),
            assessment_type: kind,
            completed_at: now_rfc3339(),
        });
    }
}

impl TableRecord for User {
    fn primary_key(&self) -> &str {
        &self.email
    }
}

// == Assessment Result ==
/// Scored submission, keyed by assessment id. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_id: String,
    pub user_email: String,
    pub assessment_type: AssessmentType,
    pub question_id: String,
    pub overall_band: f64,
    pub criteria_scores: BTreeMap<String, f64>,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub timestamp: String,
}

impl TableRecord for AssessmentResult {
    fn primary_key(&self) -> &str {
        &self.assessment_id
    }
}

// == Rubric ==
/// Examiner rubric for one assessment type, keyed by the type name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub assessment_type: String,
    pub rubric_id: String,
    pub criteria: Vec<CriterionRubric>,
    /// System prompt handed to the examiner reply model
    pub examiner_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionRubric {
    pub name: String,
    /// Band level → public descriptor
    pub band_descriptors: BTreeMap<u8, String>,
}

impl TableRecord for Rubric {
    fn primary_key(&self) -> &str {
        &self.assessment_type
    }
}

// == Consent Record ==
/// Per-user data-processing consent flags, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub user_email: String,
    pub data_processing: bool,
    pub audio_processing: bool,
    pub marketing_emails: bool,
    pub analytics: bool,
    pub third_party_sharing: bool,
    pub last_updated: String,
}

impl ConsentRecord {
    /// Defaults for a user who has never saved consent settings.
    pub fn default_for(email: impl Into<String>) -> Self {
        Self {
            user_email: email.into(),
            data_processing: true,
            audio_processing: true,
            marketing_emails: false,
            analytics: false,
            third_party_sharing: false,
            last_updated: now_rfc3339(),
        }
    }
}

impl TableRecord for ConsentRecord {
    fn primary_key(&self) -> &str {
        &self.user_email
    }
}

// == Cookie Preferences ==
/// Per-user cookie consent, keyed by email. `necessary` is always true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookiePreferences {
    pub user_email: String,
    pub necessary: bool,
    pub functional: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub last_updated: String,
}

impl CookiePreferences {
    pub fn default_for(email: impl Into<String>) -> Self {
        Self {
            user_email: email.into(),
            necessary: true,
            functional: true,
            analytics: false,
            marketing: false,
            last_updated: now_rfc3339(),
        }
    }
}

impl TableRecord for CookiePreferences {
    fn primary_key(&self) -> &str {
        &self.user_email
    }
}

// == Data Request ==
/// Export or deletion request, keyed by request id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRequest {
    pub request_id: String,
    pub user_email: String,
    pub request_type: DataRequestKind,
    pub status: DataRequestStatus,
    pub created_at: String,
    pub completed_at: Option<String>,
    /// Deletion requests execute after a grace period
    pub scheduled_for: Option<String>,
    /// Export payload, embedded once the export completes
    pub export_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataRequestKind {
    DataExport,
    DataDeletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataRequestStatus {
    Pending,
    Completed,
}

impl TableRecord for DataRequest {
    fn primary_key(&self) -> &str {
        &self.request_id
    }
}

// == Session ==
/// Login session held in the session cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_email: String,
    pub created_at: String,
}

impl Session {
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_email: user_email.into(),
            created_at: now_rfc3339(),
        }
    }
}

// == Utility Functions ==
/// Current UTC time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
