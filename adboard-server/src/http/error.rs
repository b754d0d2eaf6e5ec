//! API error types with IntoResponse
//!
//! Every failure a handler can produce is one `ApiError` variant, and
//! `into_response` is the only place statuses are chosen. Bodies are
//! `{"error": "<message>"}`, or `{"error": [{field, message, type}, ...]}` for
//! field validation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{FieldError, ValidationError};

pub const INVALID_JSON: &str = "Invalid JSON";
pub const INVALID_AD_ID: &str = "Invalid ad ID";
pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body or path could not be parsed (400)
    Malformed { message: &'static str },

    /// Field rules violated (400)
    Validation(Vec<FieldError>),

    /// Update carried no recognized field (400)
    EmptyUpdate,

    /// Body exceeds the configured request size limit (413)
    PayloadTooLarge,

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn invalid_json() -> Self {
        Self::Malformed {
            message: INVALID_JSON,
        }
    }

    pub fn invalid_ad_id() -> Self {
        Self::Malformed {
            message: INVALID_AD_ID,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Malformed { .. } | Self::Validation(_) | Self::EmptyUpdate => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Malformed { message } => json!({ "error": message }),
            Self::Validation(errors) => json!({ "error": errors }),
            Self::EmptyUpdate => json!({ "error": NO_FIELDS_TO_UPDATE }),
            Self::PayloadTooLarge => json!({ "error": BODY_TOO_LARGE }),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
                json!({ "error": not_found_message(resource) })
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({ "error": INTERNAL_ERROR })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// "ad" -> "Ad not found"
fn not_found_message(resource: &str) -> String {
    let mut chars = resource.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "Not found".to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Malformed => Self::invalid_json(),
            ValidationError::Fields(errors) => Self::Validation(errors),
            ValidationError::EmptyUpdate => Self::EmptyUpdate,
        }
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
