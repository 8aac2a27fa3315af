//! Health handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use trackline_domain::ports::TrackerRepository;

use crate::{dto::health::ReadinessResponse, AppState};

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Store readiness check
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Store is reachable", body = ReadinessResponse),
        (status = 503, description = "Store is unreachable", body = ReadinessResponse)
    ),
    tag = "health"
)]
pub async fn readiness_handler<R>(State(state): State<AppState<R>>) -> impl IntoResponse
where
    R: TrackerRepository + 'static,
{
    let snapshot = state.tracker_service.readiness().snapshot();
    let status = if snapshot.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::from(snapshot)))
}
