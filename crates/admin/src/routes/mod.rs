//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check
//!
//! # Discounts
//! GET  /app/discount/{function_id}/new  - Defaults for a new discount form
//! POST /app/discount/{function_id}/new  - Create discount(s) from form field `discount`
//! ```

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub mod discounts;
pub mod health;

/// Build the application router (without middleware layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route(
            "/app/discount/{function_id}/new",
            get(discounts::new_form).post(discounts::create),
        )
}
