//! API Module
//!
//! HTTP handlers and routing for the prep server REST API.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
