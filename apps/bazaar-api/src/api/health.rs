//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Liveness check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "bazaar-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check: verifies the database and redis connections.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.db.ping().await {
        tracing::error!("Database ping failed: {}", e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "database unavailable".to_string(),
                service: "bazaar-api".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        );
    }

    let mut redis = state.redis.clone();
    if let Err(e) = redis::cmd("PING").query_async::<String>(&mut redis).await {
        tracing::error!("Redis ping failed: {}", e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "redis unavailable".to_string(),
                service: "bazaar-api".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ready".to_string(),
            service: "bazaar-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
