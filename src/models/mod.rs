//! Models Module
//!
//! Table records plus the request/response DTOs for the HTTP API.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{
    now_rfc3339, AssessmentResult, AssessmentType, CompletedAssessment, ConsentRecord,
    CookiePreferences, CriterionRubric, DataRequest, DataRequestKind, DataRequestStatus, Purchase,
    Rubric, Session, User, ATTEMPTS_PER_PURCHASE,
};
pub use requests::{
    ConsentUpdateRequest, CookiePreferencesUpdateRequest, DataRequestBody, LoginRequest,
    LogoutRequest, PurchaseRequest, RegisterRequest, ReplyRequest, SpeechRequest, SubmitRequest,
};
pub use responses::{
    DataRequestResponse, DeleteAccountResponse, HealthResponse, LoginResponse, LogoutResponse,
    PurchaseResponse, RegisterResponse, ReplyResponse, SpeechResponse, SubmitResponse,
};
