use crate::dtos::StatusResponse;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

const RUNNING_STATUS: &str = "Server is running";

/// `GET /`
pub async fn root_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: RUNNING_STATUS.to_string(),
    })
}

/// Liveness probe. Never touches the completion API.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "analysis-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe: ready once the completion provider has credentials.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.analyzer.is_configured() {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::ServiceUnavailable)
    }
}
