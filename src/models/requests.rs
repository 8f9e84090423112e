//! Request DTOs for the prep server API
//!
//! Defines the structure of incoming HTTP request bodies. Each body knows
//! how to validate itself; handlers convert a validation message into a
//! 400 response.

use serde::Deserialize;

/// Request body for POST /api/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Option<String> {
        credentials_error(&self.email, &self.password)
    }
}

/// Request body for POST /api/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Option<String> {
        credentials_error(&self.email, &self.password)
    }
}

fn credentials_error(email: &str, password: &str) -> Option<String> {
    if email.is_empty() || password.is_empty() {
        return Some("Email and password are required".to_string());
    }
    if !email.contains('@') {
        return Some("Email address is not valid".to_string());
    }
    None
}

/// Request body for POST /api/logout
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub session_id: String,
}

/// Request body for POST /api/purchase
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub email: String,
    pub product_id: String,
}

impl PurchaseRequest {
    pub fn validate(&self) -> Option<String> {
        if self.email.is_empty() || self.product_id.is_empty() {
            return Some("Email and product_id are required".to_string());
        }
        None
    }
}

/// Request body for POST /api/submit
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub email: String,
    pub session_id: String,
    pub assessment_type: String,
    pub question_id: String,
    pub text: String,
}

impl SubmitRequest {
    pub fn validate(&self) -> Option<String> {
        if self.email.is_empty() {
            return Some("Email is required".to_string());
        }
        if self.session_id.is_empty() {
            return Some("An active session is required".to_string());
        }
        if self.assessment_type.is_empty() {
            return Some("Assessment type is required".to_string());
        }
        if self.question_id.is_empty() {
            return Some("Question id is required".to_string());
        }
        None
    }
}

/// Request body for POST /api/speech
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Request body for POST /api/reply
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

/// Request body for PUT /api/consent/:email
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsentUpdateRequest {
    #[serde(default)]
    pub data_processing: Option<bool>,
    #[serde(default)]
    pub audio_processing: Option<bool>,
    #[serde(default)]
    pub marketing_emails: Option<bool>,
    #[serde(default)]
    pub analytics: Option<bool>,
    #[serde(default)]
    pub third_party_sharing: Option<bool>,
}

/// Request body for PUT /api/cookie-preferences/:email
///
/// The `necessary` category cannot be disabled and is not accepted here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CookiePreferencesUpdateRequest {
    #[serde(default)]
    pub functional: Option<bool>,
    #[serde(default)]
    pub analytics: Option<bool>,
    #[serde(default)]
    pub marketing: Option<bool>,
}

/// Request body for POST /api/data-export and /api/data-deletion
#[derive(Debug, Clone, Deserialize)]
pub struct DataRequestBody {
    pub email: String,
}

impl DataRequestBody {
    pub fn validate(&self) -> Option<String> {
        if self.email.is_empty() {
            return Some("Email is required".to_string());
        }
        None
    }
}
