//! Readiness endpoint
//!
//! Pings the injected ad store: 200 when it answers, 503 when it does not.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Readiness report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ready" or "unavailable"
    pub status: &'static str,
    pub store: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.ads.store_name();

    match state.ads.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                store,
            }),
        ),
        Err(e) => {
            tracing::warn!(store, error = %e, "store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    store,
                }),
            )
        }
    }
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
