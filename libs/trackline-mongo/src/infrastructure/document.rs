//! Stored document layout
//!
//! One flat document per report:
//! `{_id: ObjectId, deviceId: string, latitude: double, longitude: double, timestamp: string}`.
//! Extra keys written by earlier deployments (such as `__v`) are ignored on read.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use trackline_domain::tracking::{
    DeviceId, NewTrackerReport, ReportId, TrackerReport, TrackingError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
}

impl From<&NewTrackerReport> for TrackerDocument {
    fn from(report: &NewTrackerReport) -> Self {
        Self {
            id: None,
            device_id: report.device_id().to_string(),
            latitude: report.latitude(),
            longitude: report.longitude(),
            timestamp: report.timestamp().to_string(),
        }
    }
}

impl TryFrom<TrackerDocument> for TrackerReport {
    type Error = TrackingError;

    fn try_from(document: TrackerDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| TrackingError::storage_failure("stored tracker document has no _id"))?;
        let device_id = DeviceId::parse(document.device_id).map_err(|_| {
            TrackingError::storage_failure(format!(
                "stored tracker document {} has an empty deviceId",
                id
            ))
        })?;

        Ok(TrackerReport::from_parts(
            ReportId::new(id.to_hex()),
            device_id,
            document.latitude,
            document.longitude,
            document.timestamp,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    fn new_report() -> NewTrackerReport {
        NewTrackerReport::new(
            DeviceId::parse("dev-1").unwrap(),
            37.7,
            -122.4,
            "2024-01-01T00:00:00Z".to_string(),
        )
    }

    #[test]
    fn test_new_document_uses_camel_case_and_no_id() {
        let document = TrackerDocument::from(&new_report());

        let bson_doc = bson::to_document(&document).unwrap();

        assert!(!bson_doc.contains_key("_id"));
        assert_eq!(bson_doc.get_str("deviceId").unwrap(), "dev-1");
        assert_eq!(bson_doc.get_f64("latitude").unwrap(), 37.7);
        assert_eq!(bson_doc.get_f64("longitude").unwrap(), -122.4);
        assert_eq!(bson_doc.get_str("timestamp").unwrap(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_read_ignores_version_key() {
        let id = ObjectId::new();
        let stored = doc! {
            "_id": id,
            "deviceId": "dev-1",
            "latitude": 37.7,
            "longitude": -122.4,
            "timestamp": "2024-01-01T00:00:00Z",
            "__v": 0,
        };

        let document: TrackerDocument = bson::from_document(stored).unwrap();
        let report = TrackerReport::try_from(document).unwrap();

        assert_eq!(report.id().as_str(), id.to_hex());
        assert_eq!(report.device_id().as_str(), "dev-1");
        assert_eq!(report.timestamp(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_document_without_id_is_a_storage_failure() {
        let document = TrackerDocument::from(&new_report());

        let err = TrackerReport::try_from(document).unwrap_err();

        assert!(matches!(err, TrackingError::StorageFailure(_)));
    }
}
