//! Tracker service - Business logic orchestration
//!
//! Validates submissions, checks store readiness, and delegates persistence
//! to the repository port.

use super::{
    DeviceId, RawReport, ReportId, StoreReadiness, TrackerReport, TrackingError, ValidationMode,
};
use crate::ports::TrackerRepository;

/// Configuration for the tracker service
#[derive(Debug, Clone, Default)]
pub struct TrackingConfig {
    /// How field presence is decided on ingestion (default: presence)
    pub validation: ValidationMode,
}

/// Service for recording and looking up tracker reports
///
/// The repository is injected at construction; the service holds no other
/// state, so one instance is shared by every request.
pub struct TrackerService<R> {
    repository: R,
    config: TrackingConfig,
}

impl<R> TrackerService<R>
where
    R: TrackerRepository,
{
    /// Create a new TrackerService with the given repository and configuration
    pub fn new(repository: R, config: TrackingConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new TrackerService with default configuration
    pub fn with_repository(repository: R) -> Self {
        Self::new(repository, TrackingConfig::default())
    }

    /// Validate a submission and store it as a new report
    ///
    /// Every successful call adds exactly one record, even for a submission
    /// identical to an earlier one.
    ///
    /// # Errors
    ///
    /// - `TrackingError::MissingFields` / `TrackingError::InvalidField` if
    ///   validation fails; nothing is stored
    /// - `TrackingError::StoreUnavailable` if the store is not ready
    /// - `TrackingError::StorageFailure` if the write fails
    pub async fn record_report(&self, raw: RawReport) -> Result<ReportId, TrackingError> {
        let report = raw.validate(self.config.validation)?;

        self.ensure_ready()?;

        self.repository.insert(&report).await
    }

    /// All reports stored for a device, in store order
    ///
    /// # Errors
    ///
    /// - `TrackingError::NotFound` if the device has no reports
    /// - `TrackingError::StoreUnavailable` if the store is not ready
    /// - `TrackingError::StorageFailure` if the query fails
    pub async fn reports_for_device(
        &self,
        device_id: &str,
    ) -> Result<Vec<TrackerReport>, TrackingError> {
        let device_id = DeviceId::parse(device_id).map_err(|_| TrackingError::NotFound)?;

        self.ensure_ready()?;

        let reports = self.repository.find_by_device(&device_id).await?;
        if reports.is_empty() {
            return Err(TrackingError::NotFound);
        }
        Ok(reports)
    }

    /// Readiness of the underlying store
    pub fn readiness(&self) -> &StoreReadiness {
        self.repository.readiness()
    }

    fn ensure_ready(&self) -> Result<(), TrackingError> {
        if self.repository.readiness().is_ready() {
            Ok(())
        } else {
            Err(TrackingError::StoreUnavailable)
        }
    }
}
