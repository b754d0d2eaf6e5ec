//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so parse failures use the same JSON error
//! body as every other failure.

use std::num::IntErrorKind;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde_json::Value;

use super::error::ApiError;

/// Extract a numeric ad id from the path.
///
/// A well-formed integer outside the id range cannot name a stored ad, so it
/// resolves to not found rather than a malformed id.
pub struct AdId(pub i64);

impl<S> FromRequestParts<S> for AdId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::invalid_ad_id())?;

        match raw.parse::<i64>() {
            Ok(id) => Ok(Self(id)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(ApiError::NotFound {
                    resource: "ad",
                    id: raw,
                }),
                _ => Err(ApiError::invalid_ad_id()),
            },
        }
    }
}

/// Request body parsed as JSON, whatever the `Content-Type` header says.
///
/// Object-ness is checked later by the validator. Bodies over the router's
/// body limit are rejected with 413 before any parsing.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::invalid_json()
            }
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|_| ApiError::invalid_json())?;
        Ok(Self(value))
    }
}
