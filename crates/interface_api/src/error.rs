//! API error handling

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use core_kernel::PortError;
use domain_admin::AdminError;
use domain_claims::ClaimError;
use domain_flight::FlightError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String, Vec<String>),

    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg, details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg,
                (!details.is_empty()).then_some(details),
            ),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg, None),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => ApiError::NotFound(format!("{} not found", entity_type)),
            PortError::Validation { message, field } => {
                ApiError::Validation(message, field.into_iter().collect())
            }
            PortError::Conflict { message } => ApiError::Conflict(message),
            e @ (PortError::Connection { .. }
            | PortError::Timeout { .. }
            | PortError::ServiceUnavailable { .. }) => ApiError::Unavailable(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<FlightError> for ApiError {
    fn from(err: FlightError) -> Self {
        match err {
            FlightError::FlightNotFound(_) => ApiError::NotFound("Flight not found".to_string()),
            FlightError::DuplicateFlight(_) => {
                ApiError::Conflict("Flight with this number already exists".to_string())
            }
            e @ FlightError::InvalidDelay(_) => ApiError::Validation(e.to_string(), vec!["departure.delay".to_string()]),
            FlightError::InvalidFlight(msg) => ApiError::BadRequest(msg),
            FlightError::InvalidTimestamp(_) => ApiError::BadRequest("Invalid datetime format".to_string()),
            FlightError::FeedUnavailable(_) => ApiError::BadGateway("Failed to fetch flight data".to_string()),
            FlightError::Port(e) => e.into(),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(_) => ApiError::NotFound("Claim not found".to_string()),
            ClaimError::FlightNotFound(_) => ApiError::NotFound("Flight not found".to_string()),
            ClaimError::InvalidClaim(msg) => ApiError::BadRequest(msg),
            e @ ClaimError::MissingLookupKey => ApiError::BadRequest(e.to_string()),
            ClaimError::Unassessable(msg) => {
                ApiError::Validation(msg, vec!["departure.delay".to_string()])
            }
            e @ ClaimError::InvalidSchedule(_) => ApiError::Internal(e.to_string()),
            ClaimError::Port(e) => e.into(),
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            e @ AdminError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            AdminError::DuplicateUsername(name) => {
                ApiError::Conflict(format!("Administrator {} already exists", name))
            }
            AdminError::InvalidAccount(msg) => ApiError::BadRequest(msg),
            e @ AdminError::Hashing(_) => ApiError::Internal(e.to_string()),
            AdminError::Port(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => ApiError::Forbidden(err.to_string()),
            AuthError::Issue => ApiError::Internal(err.to_string()),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::Validation("Invalid request".to_string(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_failure_is_bad_gateway() {
        let err: ApiError = FlightError::FeedUnavailable("timeout".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_duplicate_flight_is_conflict() {
        let err: ApiError = FlightError::DuplicateFlight("TU712".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_errors_split_401_and_403() {
        let unauthorized: ApiError = AuthError::TokenExpired.into();
        let forbidden: ApiError = AuthError::Forbidden.into();
        assert_eq!(unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_claim_not_found_message() {
        let err: ApiError = ClaimError::ClaimNotFound("CLM-9".into()).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Claim not found"));
    }
}
