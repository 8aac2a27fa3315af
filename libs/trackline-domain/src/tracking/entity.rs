//! Domain entities for tracker reports
//!
//! A report is one location and time observation submitted by a device.
//! Reports are immutable: there is no update or delete operation anywhere
//! in the system, so both types below only expose read accessors.

use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, ReportId};

/// A validated report that has not been persisted yet
///
/// Produced by [`RawReport::validate`](super::RawReport::validate); every
/// field is present. Coordinates are not range-checked and the timestamp is
/// kept exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrackerReport {
    device_id: DeviceId,
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

impl NewTrackerReport {
    pub fn new(device_id: DeviceId, latitude: f64, longitude: f64, timestamp: String) -> Self {
        Self {
            device_id,
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Attach the identifier the store assigned on insert
    pub fn into_persisted(self, id: ReportId) -> TrackerReport {
        TrackerReport {
            id,
            device_id: self.device_id,
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
        }
    }
}

/// A report as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerReport {
    id: ReportId,
    device_id: DeviceId,
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

impl TrackerReport {
    /// Rebuild a report from stored values
    pub fn from_parts(
        id: ReportId,
        device_id: DeviceId,
        latitude: f64,
        longitude: f64,
        timestamp: String,
    ) -> Self {
        Self {
            id,
            device_id,
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn id(&self) -> &ReportId {
        &self.id
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
