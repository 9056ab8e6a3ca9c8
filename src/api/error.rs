//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::UnknownStatus;
use crate::service::alerts::AlertStoreError;
use crate::service::forensics::InvoiceError;
use crate::service::risk::RiskError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed or out-of-range request fields (400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognised alert status (400)
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Alert not found (404)
    #[error("Alert not found: {0}")]
    NotFound(String),

    /// Status change not offered by the review workflow (409)
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Uploaded document exceeds the configured limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Forensics service could not be reached (503)
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Forensics service answered with a failure or garbage (502)
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::InvalidStatus(_) => "invalid_status",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidTransition(_) => "invalid_transition",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::UpstreamError(_) => "upstream_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<AlertStoreError> for ApiError {
    fn from(err: AlertStoreError) -> Self {
        match err {
            AlertStoreError::NotFound(id) => ApiError::NotFound(id),
            e @ AlertStoreError::InvalidTransition { .. } => {
                ApiError::InvalidTransition(e.to_string())
            }
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RiskError> for ApiError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            RiskError::AlertStore(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            InvoiceError::Unavailable(msg) => ApiError::UpstreamUnavailable(msg),
            e @ (InvoiceError::Upstream { .. } | InvoiceError::ParseError(_)) => {
                ApiError::UpstreamError(e.to_string())
            }
        }
    }
}

impl From<UnknownStatus> for ApiError {
    fn from(err: UnknownStatus) -> Self {
        ApiError::InvalidStatus(err.0)
    }
}
