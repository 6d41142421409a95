//! Error types for the organization search API.
//!
//! Every error is rendered as a JSON body of the form
//! `{"error": "<message>", "code": "<machine code>"}`.
//!
//! # Error Mapping
//!
//! | Persistence Error | HTTP Status | Code |
//! |-------------------|-------------|------|
//! | InvalidFilterSyntax | 400 | invalid_filter |
//! | UnknownField | 400 | unknown_field |
//! | FilterTypeMismatch | 400 | filter_type_mismatch |
//! | InvalidPagination | 400 | invalid_pagination |
//! | MalformedBody | 400 | malformed_body |
//! | IdAlreadyAssigned | 400 | id_already_assigned |
//! | Execution | 500 | search_failed |
//! | BackendError | 500 | internal_error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orgsearch_persistence::error::{SearchError, StorageError, ValidationError};
use std::fmt;
use tracing::error;

/// Message returned for server-side failures. Details stay in the logs.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Client input was rejected (HTTP 400).
    BadRequest {
        /// Machine-readable error code.
        code: &'static str,
        /// Error message.
        message: String,
    },

    /// Nothing matched (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// A search could not be executed (HTTP 500).
    SearchFailed {
        /// Caller-safe message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message. Logged, never returned to the caller.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::SearchFailed { .. } | RestError::InternalError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::BadRequest { code, .. } => *code,
            RestError::NotFound { .. } => "not_found",
            RestError::SearchFailed { .. } => "search_failed",
            RestError::InternalError { .. } => "internal_error",
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message, .. } => write!(f, "Bad request: {}", message),
            RestError::NotFound { message } => write!(f, "Not found: {}", message),
            RestError::SearchFailed { message } => write!(f, "Search failed: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            RestError::BadRequest { message, .. }
            | RestError::NotFound { message }
            | RestError::SearchFailed { message } => message,
            RestError::InternalError { message } => {
                error!(error = %message, "Internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(error_body(&message, code))).into_response()
    }
}

/// Builds the JSON error body.
pub fn error_body(message: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "error": message,
        "code": code,
    })
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => e.into(),
            StorageError::Search(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        let code = match &err {
            SearchError::InvalidFilterSyntax { .. } => "invalid_filter",
            SearchError::UnknownField { .. } => "unknown_field",
            SearchError::FilterTypeMismatch { .. } => "filter_type_mismatch",
            SearchError::InvalidPagination { .. } => "invalid_pagination",
            SearchError::Execution { message } => {
                return RestError::SearchFailed {
                    message: message.clone(),
                };
            }
        };

        RestError::BadRequest {
            code,
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::MalformedBody { .. } => "malformed_body",
            ValidationError::IdAlreadyAssigned { .. } => "id_already_assigned",
        };

        RestError::BadRequest {
            code,
            message: err.to_string(),
        }
    }
}

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use orgsearch_persistence::error::BackendError;

    #[test]
    fn test_search_errors_are_bad_requests() {
        let cases = [
            (
                SearchError::InvalidFilterSyntax {
                    filter: "name=CLEAR".to_string(),
                },
                "invalid_filter",
            ),
            (
                SearchError::UnknownField {
                    field: "colour".to_string(),
                },
                "unknown_field",
            ),
            (
                SearchError::FilterTypeMismatch {
                    field: "name".to_string(),
                },
                "filter_type_mismatch",
            ),
            (
                SearchError::InvalidPagination {
                    parameter: "page".to_string(),
                    value: "abc".to_string(),
                },
                "invalid_pagination",
            ),
        ];

        for (err, expected) in cases {
            let rest: RestError = err.into();
            assert_eq!(rest.status(), StatusCode::BAD_REQUEST);
            assert_eq!(rest.code(), expected);
        }
    }

    #[test]
    fn test_execution_error_is_server_error() {
        let rest: RestError = SearchError::Execution {
            message: "failed to query organizations".to_string(),
        }
        .into();
        assert_eq!(rest.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(rest.code(), "search_failed");
    }

    #[test]
    fn test_body_errors_stay_distinct() {
        let malformed: RestError = ValidationError::MalformedBody {
            message: "expected value".to_string(),
        }
        .into();
        let assigned: RestError = ValidationError::IdAlreadyAssigned {
            id: "abc".to_string(),
        }
        .into();

        assert_eq!(malformed.code(), "malformed_body");
        assert_eq!(assigned.code(), "id_already_assigned");
    }

    #[test]
    fn test_backend_error_is_internal() {
        let rest: RestError = StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: "connection refused".to_string(),
        })
        .into();
        assert_eq!(rest.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(rest.code(), "internal_error");
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_body("invalid column name 'colour'", "unknown_field");
        assert_eq!(body["error"], "invalid column name 'colour'");
        assert_eq!(body["code"], "unknown_field");
    }
}
