//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ErrorResponse, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    /// Configured record store (`memory` or `postgres`)
    pub storage: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (checks the record store answers)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Record store unreachable", body = ErrorResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = state.services.books.ping().await {
        tracing::warn!("Readiness check failed: {}", e);
        let error = crate::error::AppError::Unavailable("Record store unreachable".to_string());
        return Err((
            error.status_code(),
            Json(ErrorResponse::new("Service not ready", &error)),
        ));
    }

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.storage.backend.as_str().to_string(),
    }))
}
