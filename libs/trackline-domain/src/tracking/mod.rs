//! Tracking domain module
//!
//! Tracker reports, the rules deciding whether a submission is acceptable,
//! and the service that stores and retrieves reports through the repository port.

mod entity;
mod error;
mod ids;
mod readiness;
mod service;
mod validation;

pub use entity::{NewTrackerReport, TrackerReport};
pub use error::TrackingError;
pub use ids::{DeviceId, ReportId};
pub use readiness::{ReadinessSnapshot, StoreReadiness};
pub use service::{TrackerService, TrackingConfig};
pub use validation::{RawReport, ValidationMode};
