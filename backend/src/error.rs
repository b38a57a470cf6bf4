//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitness_tracker_shared::{ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error on {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        match first_field_error(&errors) {
            Some((field, message)) => ApiError::InvalidField { field, message },
            None => ApiError::Validation(errors.to_string()),
        }
    }
}

/// First failing field, in name order so responses are stable
///
/// Nested (flattened) structs report the inner field name.
fn first_field_error(errors: &ValidationErrors) -> Option<(String, String)> {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code));
                (field.to_string(), message)
            }),
            ValidationErrorsKind::Struct(inner) => first_field_error(inner),
            ValidationErrorsKind::List(items) => items.values().find_map(|inner| first_field_error(inner)),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            ApiError::InvalidField { field, message } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, Some(field))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_tracker_shared::{LogFoodRequest, LogWeightRequest};
    use validator::Validate;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Weight entry".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validator_errors_name_the_field() {
        let req: LogFoodRequest =
            serde_json::from_str(r#"{"name": "Toast", "calories": -5}"#).unwrap();
        let error = ApiError::from(req.validate().unwrap_err());

        match error {
            ApiError::InvalidField { field, .. } => assert_eq!(field, "calories"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_nested_validator_errors_name_the_inner_field() {
        let req: LogWeightRequest =
            serde_json::from_str(r#"{"weight": 70, "utc_offset_minutes": 9999}"#).unwrap();
        let error = ApiError::from(req.validate().unwrap_err());

        match error {
            ApiError::InvalidField { field, .. } => assert_eq!(field, "utc_offset_minutes"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            ApiError::InvalidField {
                field: "x".to_string(),
                message: "bad".to_string()
            }
            .into_response()
            .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
