//! # Web Server
//!
//! The upload page, the analyze action, a JSON API and a health check.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, HealthResponse, PredictResponse};
pub use routes::{routes, AppState};
