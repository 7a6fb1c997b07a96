//! API error types with IntoResponse
//!
//! Responses are plain text. Server-side failures are logged and
//! returned without detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::currency::CurrencyError;
use crate::db::DbError;
use crate::models::ValidationError;
use crate::uploads::UploadError;

/// Body of every 500 response
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form input rejected (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Rate lookup failed (500, logged)
    Currency(CurrencyError),

    /// Upload couldn't be written (500, logged)
    Upload(UploadError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, %id, "Not found");
                (StatusCode::NOT_FOUND, not_found_message(resource)).into_response()
            }
            Self::Database(e) => internal(format!("Database error: {}", e)),
            Self::Currency(e) => internal(format!("Currency conversion error: {}", e)),
            Self::Upload(e) => internal(format!("Upload error: {}", e)),
        }
    }
}

fn internal(detail: String) -> Response {
    tracing::error!("{}", detail);
    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
}

fn not_found_message(resource: &str) -> String {
    let mut chars = resource.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "Not found".to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<CurrencyError> for ApiError {
    fn from(e: CurrencyError) -> Self {
        Self::Currency(e)
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}
