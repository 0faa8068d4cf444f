//! Application error type and its HTTP mapping.
//!
//! Every service returns [`AppError`]. At the REST boundary each variant maps to a
//! fixed status code and an [`ErrorMessage`] body:
//!
//! | Variant              | Status |
//! |----------------------|--------|
//! | `BadRequest`         | 400    |
//! | `Unauthorized`       | 401    |
//! | `NotFound`           | 404    |
//! | `AlreadyExists`      | 409    |
//! | `Internal`           | 500    |
//! | `ServiceUnavailable` | 503    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Documentation hint attached to client errors.
pub const CLIENT_ERROR_DOCUMENTATION: &str =
    "Check the request against the API reference and try again.";

/// Documentation hint attached to server-side failures.
pub const SERVER_ERROR_DOCUMENTATION: &str =
    "Contact the service administrators if this error persists.";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub error_message: String,
    pub error_code: u16,
    pub documentation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, a missing required reference, or a failed field validation.
    #[error("{message}")]
    BadRequest { message: String },

    /// Missing, invalid or insufficiently privileged credentials.
    #[error("{message}")]
    Unauthorized { message: String },

    /// A referenced entity does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Uniqueness violation on create or update.
    #[error("{message}")]
    AlreadyExists { message: String },

    /// The car command queue is full or closed.
    #[error("{message}")]
    ServiceUnavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status mirrored by the `errorCode` field.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyExists { .. } => StatusCode::CONFLICT,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response body for this error.
    ///
    /// Internal errors never leak their message; it is logged instead.
    pub fn to_error_message(&self) -> ErrorMessage {
        let status = self.status_code();

        let (error_message, documentation) = match self {
            AppError::Internal { .. } => (
                "An unexpected error occurred".to_string(),
                SERVER_ERROR_DOCUMENTATION,
            ),
            AppError::ServiceUnavailable { message } => {
                (message.clone(), SERVER_ERROR_DOCUMENTATION)
            }
            other => (other.to_string(), CLIENT_ERROR_DOCUMENTATION),
        };

        ErrorMessage {
            error_message,
            error_code: status.as_u16(),
            documentation: documentation.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal { message } => {
                tracing::error!(error = %message, "Request failed with an internal error");
            }
            other => {
                tracing::info!(status = %other.status_code(), error = %other, "Request rejected");
            }
        }

        (self.status_code(), Json(self.to_error_message())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(format!(
            "Request with non valid fields: {}",
            violation_messages(&errors).join(" - ")
        ))
    }
}

/// Maps a database error onto the error taxonomy.
///
/// Unique violations become [`AppError::AlreadyExists`], foreign key violations
/// become [`AppError::BadRequest`], everything else is internal.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::already_exists(format!(
                "Unique constraint violation ({})",
                db.constraint().unwrap_or("unknown")
            ));
        }
        if db.is_foreign_key_violation() {
            return AppError::bad_request(format!(
                "The record is still referenced by other records ({})",
                db.constraint().unwrap_or("unknown")
            ));
        }
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::not_found("Record not found");
    }

    AppError::internal(format!("Database error: {e}"))
}

/// Flattens validator output into a sorted list of human-readable messages.
///
/// Nested struct and list errors are walked recursively. A violation without a
/// custom message is reported as `<field>: <code>`.
pub fn violation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_violations(errors, "", &mut messages);
    messages.sort();
    messages
}

fn collect_violations(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    match &err.message {
                        Some(message) => out.push(message.to_string()),
                        None => out.push(format!("{path}: {}", err.code)),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_violations(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_violations(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::already_exists("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message_mirrors_status() {
        let body = AppError::not_found("Car 7 does not exist").to_error_message();

        assert_eq!(body.error_code, 404);
        assert_eq!(body.error_message, "Car 7 does not exist");
        assert_eq!(body.documentation, CLIENT_ERROR_DOCUMENTATION);
    }

    #[test]
    fn test_internal_error_is_generic() {
        let body = AppError::internal("connection reset by peer").to_error_message();

        assert_eq!(body.error_code, 500);
        assert!(!body.error_message.contains("connection reset"));
        assert_eq!(body.documentation, SERVER_ERROR_DOCUMENTATION);
    }

    #[test]
    fn test_error_message_serializes_camel_case() {
        let body = AppError::already_exists("dup").to_error_message();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["errorMessage"], "dup");
        assert_eq!(json["errorCode"], 409);
        assert!(json.get("documentation").is_some());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
