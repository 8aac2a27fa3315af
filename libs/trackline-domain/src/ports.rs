//! Ports (trait definitions) for external dependencies
//!
//! The domain defines what it needs from a store; adapter crates provide it.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait`, so every repository is monomorphized into the service.

use std::future::Future;

use crate::tracking::{
    DeviceId, NewTrackerReport, ReportId, StoreReadiness, TrackerReport, TrackingError,
};

/// Port for tracker report persistence
///
/// Implementations must:
/// - Persist each inserted report as a new record, never merging duplicates
/// - Return reports of a device in the store's natural order
/// - Convert driver errors to `TrackingError::StorageFailure`, keeping the
///   driver message as is
pub trait TrackerRepository: Send + Sync {
    /// Persist one report and return the identifier the store assigned
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::StorageFailure` if the write fails
    fn insert(
        &self,
        report: &NewTrackerReport,
    ) -> impl Future<Output = Result<ReportId, TrackingError>> + Send;

    /// Fetch every report stored for `device_id`
    ///
    /// An unknown device yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::StorageFailure` if the query fails
    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<TrackerReport>, TrackingError>> + Send;

    /// Readiness flag maintained by the adapter
    fn readiness(&self) -> &StoreReadiness;
}
