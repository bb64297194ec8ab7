//! Response types for the leave engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Setting value returned by `GET /settings/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingResponse {
    /// The setting key.
    pub key: String,
    /// The stored value, or the default for recognized keys.
    pub value: Option<String>,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(error.kind());
        let message = error.to_string();
        let error = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            EngineError::InvalidDateRange { .. } => ApiError::new("INVALID_DATE_RANGE", message),
            EngineError::InvalidStatus { .. } => ApiError::new("INVALID_STATUS", message),
            EngineError::InvalidHours { .. } => ApiError::new("INVALID_HOURS", message),
            EngineError::AssociateNotFound { .. } => ApiError::new("ASSOCIATE_NOT_FOUND", message),
            EngineError::TimeOffRequestNotFound { .. } => {
                ApiError::new("TIME_OFF_REQUEST_NOT_FOUND", message)
            }
            EngineError::TimeEntryNotFound { .. } => ApiError::new("TIME_ENTRY_NOT_FOUND", message),
            EngineError::Unauthorized { .. } => ApiError::new("UNAUTHORIZED", message),
            EngineError::RestrictedFieldsChanged { fields } => ApiError::with_details(
                "RESTRICTED_FIELDS",
                message,
                fields
                    .iter()
                    .map(|f| f.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            EngineError::StatusConflict { .. } => ApiError::new("STATUS_CONFLICT", message),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, AssociateId, RestrictedField};

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_engine_error_status_codes() {
        let cases = [
            (
                EngineError::InvalidStatus {
                    status: "Pending".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_STATUS",
            ),
            (
                EngineError::AssociateNotFound { id: AssociateId(9) },
                StatusCode::NOT_FOUND,
                "ASSOCIATE_NOT_FOUND",
            ),
            (
                EngineError::Unauthorized {
                    actor_id: None,
                    message: "missing actor".to_string(),
                },
                StatusCode::FORBIDDEN,
                "UNAUTHORIZED",
            ),
            (
                EngineError::StatusConflict {
                    id: 1,
                    current: ApprovalStatus::Rejected,
                },
                StatusCode::CONFLICT,
                "STATUS_CONFLICT",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "x".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_restricted_fields_details_list_labels() {
        let response: ApiErrorResponse = EngineError::RestrictedFieldsChanged {
            fields: vec![RestrictedField::WorkEmail, RestrictedField::DateOfBirth],
        }
        .into();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(
            response.error.details.as_deref(),
            Some("Work Email, Date of Birth")
        );
    }
}
