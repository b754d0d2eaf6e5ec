//! Ad endpoints
//!
//! Each handler runs: path id, JSON body, validation, repository call, then
//! maps the outcome. Failures at any step short-circuit through `ApiError`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{AdId, JsonBody};
use crate::http::server::AppState;
use crate::models::{validate_create, validate_update, Ad};

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// POST /ads - create a new ad
async fn create_ad(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Ad>), ApiError> {
    let new = validate_create(&body)?;
    let ad = state.ads.create(new).await?;

    Ok((StatusCode::CREATED, Json(ad)))
}

/// GET /ads/{id} - get a single ad
async fn get_ad(
    State(state): State<Arc<AppState>>,
    AdId(id): AdId,
) -> Result<Json<Ad>, ApiError> {
    let ad = state.ads.get(id).await?;
    Ok(Json(ad))
}

/// PATCH /ads/{id} - partial update
async fn update_ad(
    State(state): State<Arc<AppState>>,
    AdId(id): AdId,
    JsonBody(body): JsonBody,
) -> Result<Json<Ad>, ApiError> {
    let patch = validate_update(&body)?;
    let ad = state.ads.update(id, patch).await?;

    Ok(Json(ad))
}

/// DELETE /ads/{id} - delete an ad
async fn delete_ad(
    State(state): State<Arc<AppState>>,
    AdId(id): AdId,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.ads.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Ad deleted",
    }))
}

/// Ad routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ads", post(create_ad))
        .route("/ads/{id}", get(get_ad).patch(update_ad).delete(delete_ad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::MemoryAdRepo;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router().with_state(Arc::new(AppState::new(MemoryAdRepo::new())))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let body = body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty);
        let response = app
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn patch_validates_id_before_body() {
        let app = app();
        let (status, body) = send(&app, "PATCH", "/ads/x", Some("{bad")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid ad ID"}));
    }

    #[tokio::test]
    async fn patch_missing_ad_with_valid_body_is_404() {
        let app = app();
        let (status, body) = send(&app, "PATCH", "/ads/5", Some(r#"{"title":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Ad not found"}));
    }

    #[tokio::test]
    async fn patch_empty_update_checked_before_lookup() {
        let app = app();
        let (status, body) = send(&app, "PATCH", "/ads/5", Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No fields to update"}));
    }

    #[tokio::test]
    async fn delete_returns_message() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/ads",
            Some(r#"{"title":"Bike","description":"Old bike","owner":"alice"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "DELETE", "/ads/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Ad deleted"}));
    }
}
