//! Response DTOs for the prep server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

/// Response body for POST /api/register
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email: String,
}

impl RegisterResponse {
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            message: format!("Account created for {}", email),
            email,
        }
    }
}

/// Response body for POST /api/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub session_id: String,
    pub email: String,
}

impl LoginResponse {
    pub fn new(email: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: "Login successful".to_string(),
            session_id: session_id.into(),
            email: email.into(),
        }
    }
}

/// Response body for POST /api/logout
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl LogoutResponse {
    pub fn new() -> Self {
        Self {
            message: "You have been logged out".to_string(),
        }
    }
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for POST /api/purchase
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResponse {
    pub message: String,
    pub assessment_type: String,
    pub assessments_remaining: u32,
}

/// Response body for POST /api/submit
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub assessment_id: String,
    pub assessment_type: String,
    pub overall_band: f64,
    pub criteria_scores: BTreeMap<String, f64>,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub attempts_remaining: u32,
}

/// Response body for POST /api/speech
#[derive(Debug, Clone, Serialize)]
pub struct SpeechResponse {
    /// Base64-encoded audio, or null when there was nothing to synthesize
    pub audio: Option<String>,
    pub encoding: String,
}

impl SpeechResponse {
    pub fn new(audio: Option<String>) -> Self {
        Self {
            audio,
            encoding: "base64".to_string(),
        }
    }
}

/// Response body for POST /api/reply
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Response body for the data export/deletion endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DataRequestResponse {
    pub request_id: String,
    pub status: String,
    pub message: String,
}

/// Response body for DELETE /api/account/:email
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAccountResponse {
    pub message: String,
    pub email: String,
    pub results_deleted: usize,
    pub sessions_deleted: usize,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub tables: BTreeMap<String, usize>,
    pub active_sessions: usize,
}

impl HealthResponse {
    pub fn healthy(tables: BTreeMap<String, usize>, active_sessions: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            tables,
            active_sessions,
        }
    }
}
