//! DTOs for tracker endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trackline_domain::tracking::TrackerReport;
use utoipa::ToSchema;

/// Request body for a tracker report submission
///
/// Documents the accepted object. Handlers read the body as untyped JSON and
/// the domain picks these fields out by name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackerSubmission {
    /// Identifier of the reporting device
    #[serde(rename = "deviceId", default)]
    #[schema(value_type = String, example = "dev-1")]
    pub device_id: Option<Value>,
    /// Latitude of the observation
    #[serde(default)]
    #[schema(value_type = f64, example = 37.7)]
    pub latitude: Option<Value>,
    /// Longitude of the observation
    #[serde(default)]
    #[schema(value_type = f64, example = json!(-122.4))]
    pub longitude: Option<Value>,
    /// Device-supplied time of the observation, stored as sent
    #[serde(default)]
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<Value>,
}

/// Response body for a stored report
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackerSavedResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Tracker data saved")]
    pub message: String,
    /// Identifier the store assigned to the new report
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
}

/// One stored report as returned by the lookup endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackerReportResponse {
    #[serde(rename = "_id")]
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[serde(rename = "deviceId")]
    #[schema(example = "dev-1")]
    pub device_id: String,
    #[schema(example = 37.7)]
    pub latitude: f64,
    #[schema(example = json!(-122.4))]
    pub longitude: f64,
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}

impl From<TrackerReport> for TrackerReportResponse {
    fn from(report: TrackerReport) -> Self {
        Self {
            id: report.id().to_string(),
            device_id: report.device_id().to_string(),
            latitude: report.latitude(),
            longitude: report.longitude(),
            timestamp: report.timestamp().to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "Missing required fields")]
    pub error: String,
}
