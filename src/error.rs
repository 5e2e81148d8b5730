use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::messages::t;

pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    Unprocessable(String),
    Validation(FieldErrors),
    RateLimited(String),
    /// 500 whose message is shown to the client as is.
    Failure(String),
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::Unprocessable(msg) => write!(f, "Unprocessable: {msg}"),
            AppError::Validation(errors) => {
                write!(f, "Validation failed on {} field(s)", errors.len())
            }
            AppError::RateLimited(msg) => write!(f, "Rate Limited: {msg}"),
            AppError::Failure(msg) => write!(f, "Failure: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Error carrying the translated text of a message key.
    pub fn not_found(key: &str) -> Self {
        AppError::NotFound(t(key))
    }

    pub fn unauthorized(key: &str) -> Self {
        AppError::Unauthorized(t(key))
    }

    pub fn forbidden(key: &str) -> Self {
        AppError::Forbidden(t(key))
    }

    pub fn bad_request(key: &str) -> Self {
        AppError::BadRequest(t(key))
    }

    pub fn conflict(key: &str) -> Self {
        AppError::Conflict(t(key))
    }

    pub fn unprocessable(key: &str) -> Self {
        AppError::Unprocessable(t(key))
    }

    pub fn failure(key: &str) -> Self {
        AppError::Failure(t(key))
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, data) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                t("validation.failed"),
                Some(json!({ "errors": errors })),
            ),
            AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg, None),
            AppError::Failure(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = match data {
            Some(data) => json!({ "status": "error", "message": message, "data": data }),
            None => json!({ "status": "error", "message": message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}
