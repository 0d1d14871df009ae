/// Health check endpoint
///
/// `GET /api/health` reports whether the server is up and whether the
/// database answers a round trip. Public, no credentials required.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use visionize_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,

    /// "connected" or "disconnected"
    pub db: String,

    pub version: String,
}

/// Returns service health including database connectivity.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = match pool::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    Json(HealthResponse {
        ok: true,
        db: db.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
