// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

/// Liveness probe.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Mock Test Platform API",
        "status": "running"
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}
