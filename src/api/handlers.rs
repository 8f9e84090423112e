//! API Handlers
//!
//! HTTP request handlers for every endpoint. Each handler validates its
//! input, takes the state lock for exactly one service call, and converts
//! every failure into the [`AppError`] taxonomy; no lock is held across a
//! capability await.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AssessmentResult, AssessmentType, ConsentRecord, ConsentUpdateRequest, CookiePreferences,
    CookiePreferencesUpdateRequest, DataRequest, DataRequestBody, DataRequestResponse,
    DeleteAccountResponse, HealthResponse, LoginRequest, LoginResponse, LogoutRequest,
    LogoutResponse, PurchaseRequest, PurchaseResponse, RegisterRequest, RegisterResponse,
    ReplyRequest, ReplyResponse, SpeechRequest, SpeechResponse, SubmitRequest, SubmitResponse,
};
use crate::providers::{
    EmailSender, MockEmailSender, MockExaminer, MockSpeechSynthesizer, ReplyGenerator,
    SpeechSynthesizer,
};
use crate::services::{AttemptCounts, Question, Services, UserProfile};

// == App State ==
/// Application state shared across all handlers: the service aggregate
/// behind a lock, plus the outbound capabilities.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<RwLock<Services>>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub examiner: Arc<dyn ReplyGenerator>,
    pub mailer: Arc<dyn EmailSender>,
}

impl AppState {
    /// Creates state with the mock capability providers.
    pub fn new(services: Services) -> Self {
        Self {
            services: Arc::new(RwLock::new(services)),
            speech: Arc::new(MockSpeechSynthesizer),
            examiner: Arc::new(MockExaminer),
            mailer: Arc::new(MockEmailSender),
        }
    }

    /// Creates state from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Services::new(config.session_ttl, config.scoring.clone()))
    }
}

fn parse_assessment_type(value: &str) -> Result<AssessmentType> {
    AssessmentType::parse(value)
        .ok_or_else(|| AppError::Validation(format!("Unknown assessment type: {value}")))
}

// == Health ==
/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let services = state.services.read().await;
    let snapshot = services.health_snapshot();
    Json(HealthResponse::healthy(
        snapshot.tables,
        snapshot.active_sessions,
    ))
}

// == Accounts ==
/// Handler for POST /api/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }

    let mut services = state.services.write().await;
    let user = services.create_user(&req.email, &req.password)?;
    Ok(Json(RegisterResponse::new(user.email)))
}

/// Handler for POST /api/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }

    let mut services = state.services.write().await;
    let user = services
        .verify_credentials(&req.email, &req.password)
        .ok_or_else(|| AppError::NotFound("Invalid email or password".to_string()))?;

    let session = services.create_session(&user.email)?;
    Ok(Json(LoginResponse::new(user.email, session.session_id)))
}

/// Handler for POST /api/logout
///
/// Logging out an unknown or already-expired session is not an error.
pub async fn logout_handler(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Json<LogoutResponse> {
    let mut services = state.services.write().await;
    services.delete_session(&req.session_id);
    Json(LogoutResponse::new())
}

/// Handler for GET /api/profile/:email
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserProfile>> {
    let mut services = state.services.write().await;
    let profile = services.user_profile(&email)?;
    Ok(Json(profile))
}

// == Purchases ==
/// Handler for POST /api/purchase
pub async fn purchase_handler(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }

    let mut services = state.services.write().await;
    let purchase = services.add_purchase(&req.email, &req.product_id)?;
    Ok(Json(PurchaseResponse {
        message: format!("Purchase recorded for {}", purchase.assessment_type),
        assessment_type: purchase.assessment_type.as_str().to_string(),
        assessments_remaining: purchase.assessments_remaining,
    }))
}

/// Handler for GET /api/assessments/:email
pub async fn assessments_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<BTreeMap<String, AttemptCounts>>> {
    let mut services = state.services.write().await;
    let counts = services.assessment_counts(&email)?;
    Ok(Json(counts))
}

// == Assessments ==
/// Handler for GET /api/question/:email/:assessment_type
pub async fn question_handler(
    State(state): State<AppState>,
    Path((email, assessment_type)): Path<(String, String)>,
) -> Result<Json<Question>> {
    let kind = parse_assessment_type(&assessment_type)?;

    let mut services = state.services.write().await;
    let question = services.unique_question(&email, kind)?;
    Ok(Json(question))
}

/// Handler for POST /api/submit
///
/// Requires a live session belonging to the submitting user, then scores
/// the text, stores the result, and consumes one attempt.
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }
    let kind = parse_assessment_type(&req.assessment_type)?;

    let mut services = state.services.write().await;

    let session = services
        .get_session(&req.session_id)
        .ok_or_else(|| AppError::NotFound("Session expired or not found".to_string()))?;
    if session.user_email != req.email {
        return Err(AppError::Validation(
            "Session does not belong to this user".to_string(),
        ));
    }

    let (result, attempts_remaining) =
        services.submit_assessment(&req.email, kind, &req.question_id, &req.text)?;

    Ok(Json(SubmitResponse {
        assessment_id: result.assessment_id,
        assessment_type: kind.as_str().to_string(),
        overall_band: result.overall_band,
        criteria_scores: result.criteria_scores,
        feedback: result.feedback,
        strengths: result.strengths,
        improvements: result.improvements,
        attempts_remaining,
    }))
}

/// Handler for GET /api/assessment-history/:email
pub async fn history_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<AssessmentResult>>> {
    let mut services = state.services.write().await;
    if !services.user_exists(&email) {
        return Err(AppError::NotFound(format!("No account for {email}")));
    }
    Ok(Json(services.assessment_history(&email)))
}

// == AI Capabilities ==
/// Handler for POST /api/speech
pub async fn speech_handler(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> Result<Json<SpeechResponse>> {
    let audio = state.speech.synthesize(&req.text).await?;
    Ok(Json(SpeechResponse::new(
        audio.map(|bytes| BASE64.encode(bytes)),
    )))
}

/// Handler for POST /api/reply
pub async fn reply_handler(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>> {
    let reply = state.examiner.generate_reply(&req.text).await?;
    Ok(Json(ReplyResponse { reply }))
}

// == Privacy ==
/// Handler for GET /api/consent/:email
pub async fn consent_get_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Json<ConsentRecord> {
    let mut services = state.services.write().await;
    Json(services.consent(&email))
}

/// Handler for PUT /api/consent/:email
pub async fn consent_put_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<ConsentUpdateRequest>,
) -> Result<Json<ConsentRecord>> {
    let mut services = state.services.write().await;
    let record = services.update_consent(&email, &req)?;
    Ok(Json(record))
}

/// Handler for GET /api/cookie-preferences/:email
pub async fn cookie_preferences_get_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Json<CookiePreferences> {
    let mut services = state.services.write().await;
    Json(services.cookie_preferences(&email))
}

/// Handler for PUT /api/cookie-preferences/:email
pub async fn cookie_preferences_put_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<CookiePreferencesUpdateRequest>,
) -> Result<Json<CookiePreferences>> {
    let mut services = state.services.write().await;
    let prefs = services.update_cookie_preferences(&email, &req)?;
    Ok(Json(prefs))
}

/// Handler for POST /api/data-export
///
/// Builds the export, then emails a confirmation. The lock is released
/// before the email send.
pub async fn data_export_handler(
    State(state): State<AppState>,
    Json(req): Json<DataRequestBody>,
) -> Result<Json<DataRequestResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }

    let request = {
        let mut services = state.services.write().await;
        services.request_data_export(&req.email)?
    };

    state
        .mailer
        .send_email(
            &req.email,
            "Your data export is ready",
            "<p>Your data export has been prepared.</p>",
            "Your data export has been prepared.",
        )
        .await?;

    Ok(Json(DataRequestResponse {
        request_id: request.request_id,
        status: "completed".to_string(),
        message: "Your data export has been prepared".to_string(),
    }))
}

/// Handler for POST /api/data-deletion
pub async fn data_deletion_handler(
    State(state): State<AppState>,
    Json(req): Json<DataRequestBody>,
) -> Result<Json<DataRequestResponse>> {
    if let Some(message) = req.validate() {
        return Err(AppError::Validation(message));
    }

    let request = {
        let mut services = state.services.write().await;
        services.request_data_deletion(&req.email)?
    };
    let scheduled_for = request.scheduled_for.clone().unwrap_or_default();

    state
        .mailer
        .send_email(
            &req.email,
            "Data deletion scheduled",
            "<p>Your data will be deleted after the grace period.</p>",
            "Your data will be deleted after the grace period.",
        )
        .await?;

    Ok(Json(DataRequestResponse {
        request_id: request.request_id,
        status: "pending".to_string(),
        message: format!("Deletion scheduled for {scheduled_for}"),
    }))
}

/// Handler for GET /api/data-request/:request_id
pub async fn data_request_status_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<DataRequest>> {
    let mut services = state.services.write().await;
    let request = services
        .data_request_status(&request_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown request id: {request_id}")))?;
    Ok(Json(request))
}

/// Handler for DELETE /api/account/:email
pub async fn delete_account_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<DeleteAccountResponse>> {
    let mut services = state.services.write().await;
    let report = services.delete_user_completely(&email)?;
    Ok(Json(DeleteAccountResponse {
        message: format!("All data deleted for {email}"),
        email,
        results_deleted: report.results_deleted,
        sessions_deleted: report.sessions_deleted,
    }))
}
