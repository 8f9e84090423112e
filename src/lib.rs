//! Prep Server - an IELTS exam-preparation backend
//!
//! Accounts, sessions, purchases, heuristic band scoring, and privacy
//! operations over an in-memory TTL store, served through an HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod scoring;
pub mod services;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use services::Services;
pub use tasks::spawn_cleanup_task;
