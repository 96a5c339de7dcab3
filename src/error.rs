//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Domain(ref domain_err) = self;
        let (status, error_code, details) = match domain_err {
            DomainError::UserNotFound(user) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(user.clone()))
            }
            DomainError::InsufficientFunds { .. } => (
                StatusCode::BAD_REQUEST,
                "insufficient_funds",
                Some(domain_err.to_string()),
            ),
            DomainError::LoanNotFound(msg) => {
                (StatusCode::BAD_REQUEST, "loan_not_found", Some(msg.clone()))
            }
            DomainError::InvalidAmount(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_amount", Some(msg.clone()))
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
