//! In-memory repository
//!
//! Substitute store for tests and local experiments. Ids are sequential
//! hex strings so insertion order is visible.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::TrackerRepository;
use crate::tracking::{
    DeviceId, NewTrackerReport, ReportId, StoreReadiness, TrackerReport, TrackingError,
};

#[derive(Debug, Clone)]
pub struct InMemoryTrackerRepository {
    reports: Arc<Mutex<Vec<TrackerReport>>>,
    readiness: StoreReadiness,
}

impl InMemoryTrackerRepository {
    /// An empty repository that is ready immediately
    pub fn new() -> Self {
        Self::with_readiness(StoreReadiness::ready())
    }

    /// An empty repository sharing an externally controlled readiness flag
    pub fn with_readiness(readiness: StoreReadiness) -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            readiness,
        }
    }

    /// Number of stored reports across all devices
    pub fn len(&self) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTrackerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerRepository for InMemoryTrackerRepository {
    fn insert(
        &self,
        report: &NewTrackerReport,
    ) -> impl Future<Output = Result<ReportId, TrackingError>> + Send {
        let reports = self.reports.clone();
        let report = report.clone();

        async move {
            let mut reports = reports.lock().unwrap_or_else(PoisonError::into_inner);
            let id = ReportId::new(format!("{:024x}", reports.len() + 1));
            reports.push(report.into_persisted(id.clone()));
            Ok(id)
        }
    }

    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<TrackerReport>, TrackingError>> + Send {
        let reports = self.reports.clone();
        let device_id = device_id.clone();

        async move {
            Ok(reports
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|report| report.device_id() == &device_id)
                .cloned()
                .collect())
        }
    }

    fn readiness(&self) -> &StoreReadiness {
        &self.readiness
    }
}
