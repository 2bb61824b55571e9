//! Unified error handling for the HTTP surface.
//!
//! Provisioning failures never reach this type; they are returned as a
//! failed outcome with status 200. `AppError` covers requests rejected
//! before provisioning starts.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use discount_provisioner_core::{CreationOutcome, UserError};
use thiserror::Error;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request carries no usable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Request rejected");

        // Body has the shape of a failed outcome
        let body = CreationOutcome::single_error(UserError::new(self.to_string()));
        (self.status(), Json(body)).into_response()
    }
}
