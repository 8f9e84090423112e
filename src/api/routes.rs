//! API Routes
//!
//! Configures the Axum router with all prep-server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    assessments_handler, consent_get_handler, consent_put_handler,
    cookie_preferences_get_handler, cookie_preferences_put_handler, data_deletion_handler,
    data_export_handler, data_request_status_handler, delete_account_handler, health_handler,
    history_handler, login_handler, logout_handler, profile_handler, purchase_handler,
    question_handler, register_handler, reply_handler, speech_handler, submit_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Store health snapshot
/// - `POST /api/register` / `POST /api/login` / `POST /api/logout` - Accounts
/// - `GET /api/profile/:email` - Profile view
/// - `POST /api/purchase` / `GET /api/assessments/:email` - Entitlements
/// - `GET /api/question/:email/:assessment_type` - Question selection
/// - `POST /api/submit` - Score a submission
/// - `GET /api/assessment-history/:email` - Stored results
/// - `POST /api/speech` / `POST /api/reply` - Examiner AI capabilities
/// - `GET|PUT /api/consent/:email` - Consent settings
/// - `GET|PUT /api/cookie-preferences/:email` - Cookie settings
/// - `POST /api/data-export` / `POST /api/data-deletion` - Data requests
/// - `GET /api/data-request/:request_id` - Request status
/// - `DELETE /api/account/:email` - Full account deletion
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/profile/:email", get(profile_handler))
        .route("/api/purchase", post(purchase_handler))
        .route("/api/assessments/:email", get(assessments_handler))
        .route(
            "/api/question/:email/:assessment_type",
            get(question_handler),
        )
        .route("/api/submit", post(submit_handler))
        .route("/api/assessment-history/:email", get(history_handler))
        .route("/api/speech", post(speech_handler))
        .route("/api/reply", post(reply_handler))
        .route(
            "/api/consent/:email",
            get(consent_get_handler).put(consent_put_handler),
        )
        .route(
            "/api/cookie-preferences/:email",
            get(cookie_preferences_get_handler).put(cookie_preferences_put_handler),
        )
        .route("/api/data-export", post(data_export_handler))
        .route("/api/data-deletion", post(data_deletion_handler))
        .route(
            "/api/data-request/:request_id",
            get(data_request_status_handler),
        )
        .route("/api/account/:email", delete(delete_account_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use crate::services::Services;
    use crate::store::DEFAULT_SESSION_TTL;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let services = Services::new(DEFAULT_SESSION_TTL, ScoringConfig::default());
        create_router(AppState::new(services))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/register")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email":"a@b.com","password":"pw123"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/profile/ghost@b.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
