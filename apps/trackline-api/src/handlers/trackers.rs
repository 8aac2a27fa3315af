//! Tracker handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};
use trackline_domain::{
    ports::TrackerRepository,
    tracking::{RawReport, TrackingError},
};

use crate::{
    dto::trackers::{
        ErrorResponse, TrackerReportResponse, TrackerSavedResponse, TrackerSubmission,
    },
    AppState,
};

/// Store one tracker report
#[utoipa::path(
    post,
    path = "/trackers",
    request_body = TrackerSubmission,
    responses(
        (status = 201, description = "Tracker data saved", body = TrackerSavedResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Store error, message passed through", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "trackers"
)]
pub async fn create_tracker_handler<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: TrackerRepository + 'static,
{
    let body = match payload {
        Ok(Json(body)) => body,
        // A body that is not declared as JSON carries no fields at all
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected tracker submission body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    match state.tracker_service.record_report(RawReport::from(body)).await {
        Ok(report_id) => {
            info!(report_id = %report_id, "Tracker data saved");
            (
                StatusCode::CREATED,
                Json(TrackerSavedResponse {
                    success: true,
                    message: "Tracker data saved".to_string(),
                    id: report_id.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => tracking_error_response(err),
    }
}

/// Fetch every report stored for a device
#[utoipa::path(
    get,
    path = "/trackers/{deviceId}",
    params(
        ("deviceId" = String, Path, description = "Device identifier")
    ),
    responses(
        (status = 200, description = "Stored reports in store order", body = [TrackerReportResponse]),
        (status = 404, description = "No data found", body = ErrorResponse),
        (status = 500, description = "Store error, message passed through", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "trackers"
)]
pub async fn get_trackers_handler<R>(
    State(state): State<AppState<R>>,
    Path(device_id): Path<String>,
) -> Response
where
    R: TrackerRepository + 'static,
{
    match state.tracker_service.reports_for_device(&device_id).await {
        Ok(reports) => {
            info!(device_id = %device_id, count = reports.len(), "Tracker data retrieved");
            let body: Vec<TrackerReportResponse> =
                reports.into_iter().map(TrackerReportResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => tracking_error_response(err),
    }
}

fn tracking_error_response(err: TrackingError) -> Response {
    let status = match &err {
        TrackingError::MissingFields | TrackingError::InvalidField { .. } => {
            StatusCode::BAD_REQUEST
        }
        TrackingError::NotFound => StatusCode::NOT_FOUND,
        TrackingError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        TrackingError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if err.is_client_error() {
        warn!(error = %err, "Tracker request rejected");
    } else {
        error!(error = %err, "Tracker request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
