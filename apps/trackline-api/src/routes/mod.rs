//! API routes

pub mod trackers;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use trackline_domain::ports::TrackerRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::{
        health::ReadinessResponse,
        trackers::{
            ErrorResponse, TrackerReportResponse, TrackerSavedResponse, TrackerSubmission,
        },
    },
    handlers::{
        self,
        health::{health_handler, readiness_handler},
    },
    AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::trackers::create_tracker_handler,
        handlers::trackers::get_trackers_handler,
        handlers::health::health_handler,
        handlers::health::readiness_handler
    ),
    components(
        schemas(
            TrackerSubmission,
            TrackerSavedResponse,
            TrackerReportResponse,
            ErrorResponse,
            ReadinessResponse
        )
    ),
    tags(
        (name = "trackers", description = "Tracker report ingestion and lookup"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Trackline API",
        version = "0.1.0",
        description = "Accepts location reports from IoT trackers and serves them back by device"
    )
)]
pub struct ApiDoc;

/// Create the main application router
///
/// Every origin is allowed; requests are traced at the `DEBUG` level.
pub fn create_router<R>(state: AppState<R>) -> Router
where
    R: TrackerRepository + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(trackers::routes::<R>())
        .route("/health", get(health_handler))
        .route("/readyz", get(readiness_handler::<R>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::future::Future;
    use tower::ServiceExt;
    use trackline_domain::memory::InMemoryTrackerRepository;
    use trackline_domain::tracking::{
        DeviceId, NewTrackerReport, ReportId, StoreReadiness, TrackerReport, TrackerService,
        TrackingConfig, TrackingError, ValidationMode,
    };

    struct FailingRepository {
        readiness: StoreReadiness,
    }

    impl TrackerRepository for FailingRepository {
        fn insert(
            &self,
            _report: &NewTrackerReport,
        ) -> impl Future<Output = Result<ReportId, TrackingError>> + Send {
            async {
                Err::<ReportId, _>(TrackingError::storage_failure(
                    "Server selection timeout: No available servers",
                ))
            }
        }

        fn find_by_device(
            &self,
            _device_id: &DeviceId,
        ) -> impl Future<Output = Result<Vec<TrackerReport>, TrackingError>> + Send {
            async {
                Err::<Vec<TrackerReport>, _>(TrackingError::storage_failure(
                    "connection reset by peer",
                ))
            }
        }

        fn readiness(&self) -> &StoreReadiness {
            &self.readiness
        }
    }

    fn app_with(repository: InMemoryTrackerRepository, validation: ValidationMode) -> Router {
        let service = TrackerService::new(repository, TrackingConfig { validation });
        create_router(AppState::new(service))
    }

    fn app() -> Router {
        app_with(InMemoryTrackerRepository::new(), ValidationMode::Presence)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/trackers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn dev1_report() -> Value {
        json!({
            "deviceId": "dev-1",
            "latitude": 37.7,
            "longitude": -122.4,
            "timestamp": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_post_then_get_round_trip() {
        let app = app();

        let (status, body) = send(&app, post_json(dev1_report())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Tracker data saved"));
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get("/trackers/dev-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "_id": id,
                "deviceId": "dev-1",
                "latitude": 37.7,
                "longitude": -122.4,
                "timestamp": "2024-01-01T00:00:00Z"
            }])
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request_and_stores_nothing() {
        let repository = InMemoryTrackerRepository::new();
        let app = app_with(repository.clone(), ValidationMode::Presence);

        for field in ["deviceId", "latitude", "longitude", "timestamp"] {
            let mut body = dev1_report();
            body.as_object_mut().unwrap().remove(field);

            let (status, body) = send(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
            assert_eq!(body, json!({"error": "Missing required fields"}));
        }
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_zero_coordinates_depend_on_validation_mode() {
        let body = json!({"deviceId": "dev-2", "latitude": 0, "longitude": 0, "timestamp": "t"});

        let legacy = app_with(InMemoryTrackerRepository::new(), ValidationMode::Truthiness);
        let (status, response) = send(&legacy, post_json(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": "Missing required fields"}));

        let (status, _) = send(&app(), post_json(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_invalid_coordinate_type_is_bad_request() {
        let mut body = dev1_report();
        body["latitude"] = json!("north");

        let (status, response) = send(&app(), post_json(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response,
            json!({"error": "Invalid value for latitude: expected a number"})
        );
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_is_missing_fields() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/trackers")
            .body(Body::from("deviceId=dev-1"))
            .unwrap();

        let (status, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing required fields"}));
    }

    #[tokio::test]
    async fn test_array_body_is_missing_fields_and_stores_nothing() {
        let repository = InMemoryTrackerRepository::new();
        let app = app_with(repository.clone(), ValidationMode::Presence);

        let (status, body) = send(&app, post_json(json!(["dev-9", 1.5, 2.5, "t"]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing required fields"}));
        assert!(repository.is_empty());

        let (status, _) = send(&app, get("/trackers/dev-9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/trackers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"deviceId\": "))
            .unwrap();

        let (status, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_device_is_not_found() {
        let (status, body) = send(&app(), get("/trackers/unknown-device")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "No data found"}));
    }

    #[tokio::test]
    async fn test_duplicate_posts_are_both_returned() {
        let app = app();

        send(&app, post_json(dev1_report())).await;
        send(&app, post_json(dev1_report())).await;
        let (status, body) = send(&app, get("/trackers/dev-1")).await;

        assert_eq!(status, StatusCode::OK);
        let reports = body.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_ne!(reports[0]["_id"], reports[1]["_id"]);
    }

    #[tokio::test]
    async fn test_store_errors_pass_message_through() {
        let service = TrackerService::with_repository(FailingRepository {
            readiness: StoreReadiness::ready(),
        });
        let app = create_router(AppState::new(service));

        let (status, body) = send(&app, post_json(dev1_report())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Server selection timeout: No available servers"})
        );

        let (status, body) = send(&app, get("/trackers/dev-1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "connection reset by peer"}));
    }

    #[tokio::test]
    async fn test_unready_store_is_service_unavailable() {
        let readiness = StoreReadiness::new();
        let repository = InMemoryTrackerRepository::with_readiness(readiness.clone());
        let app = app_with(repository, ValidationMode::Presence);

        let (status, body) = send(&app, post_json(dev1_report())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"error": "Store unavailable"}));

        let (status, body) = send(&app, get("/readyz")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["ready"], json!(false));

        readiness.mark_ready();

        let (status, body) = send(&app, get("/readyz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], json!(true));
        assert!(body["checkedAt"].is_string());
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/trackers/dev-1")
            .header(header::ORIGIN, "https://dashboard.example.com")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn test_openapi_lists_tracker_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/trackers"));
        assert!(doc.paths.paths.contains_key("/trackers/{deviceId}"));
    }
}
