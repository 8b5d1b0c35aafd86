//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::user::{ValidationErrorSet, CREDENTIALS_MISMATCH_MESSAGE};
use crate::domain::DomainError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error categories reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// `{"error": {...}}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Response body: either the error envelope or a flat field-to-message map
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Error(ApiErrorResponse),
    Fields(ValidationErrorSet),
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody::Error(ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            }),
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        if let ApiErrorBody::Error(response) = &mut self.body {
            response.error.code = Some(code.into());
        }
        self
    }

    /// Field messages with the given status
    pub fn fields(status: StatusCode, errors: ValidationErrorSet) -> Self {
        Self {
            status,
            body: ApiErrorBody::Fields(errors),
        }
    }

    /// 422 with the failing fields
    pub fn unprocessable(errors: ValidationErrorSet) -> Self {
        Self::fields(StatusCode::UNPROCESSABLE_ENTITY, errors)
    }

    /// 401 naming both credentials, so neither is singled out
    pub fn credentials_mismatch() -> Self {
        let mut errors = ValidationErrorSet::new();
        errors.add("email", CREDENTIALS_MISMATCH_MESSAGE);
        errors.add("password", CREDENTIALS_MISMATCH_MESSAGE);

        Self::fields(StatusCode::UNAUTHORIZED, errors)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    /// 500 with a fixed message; details belong in the logs
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            INTERNAL_ERROR_MESSAGE,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Use cases turn expected conflicts into rejections, so any `DomainError`
/// reaching the transport is a fault.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        tracing::error!(error = %err, "Request failed");
        Self::internal()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            ApiErrorBody::Error(response) => {
                write!(f, "{}: {}", response.error.error_type, response.error.message)
            }
            ApiErrorBody::Fields(errors) => {
                write!(f, "{}: {} invalid field(s)", self.status, errors.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid JSON");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let ApiErrorBody::Error(response) = &err.body else {
            panic!("expected an error envelope");
        };
        assert_eq!(response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(response.error.message, "Invalid JSON");
    }

    #[test]
    fn test_faults_hide_details() {
        let err: ApiError = DomainError::persistence("password=hunter2 host=db").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let json = serde_json::to_string(&err.body).unwrap();
        assert_eq!(
            json,
            r#"{"error":{"message":"Internal server error","type":"server_error"}}"#
        );
    }

    #[test]
    fn test_every_fault_is_500() {
        for err in [
            DomainError::conflict("x"),
            DomainError::crypto("x"),
            DomainError::signing("x"),
            DomainError::configuration("x"),
            DomainError::internal("x"),
        ] {
            let api_err: ApiError = err.into();
            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_credentials_mismatch_body() {
        let err = ApiError::credentials_mismatch();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let json: serde_json::Value = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["email"], CREDENTIALS_MISMATCH_MESSAGE);
        assert_eq!(json["password"], CREDENTIALS_MISMATCH_MESSAGE);
    }

    #[test]
    fn test_unprocessable_is_flat_map() {
        let err = ApiError::unprocessable(ValidationErrorSet::single("name", "The name field is required."));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let json = serde_json::to_string(&err.body).unwrap();
        assert_eq!(json, r#"{"name":"The name field is required."}"#);
    }

    #[test]
    fn test_with_code() {
        let err = ApiError::bad_request("bad").with_code("json_parse_error");
        let json = serde_json::to_string(&err.body).unwrap();
        assert!(json.contains("json_parse_error"));
    }
}
