//! DTOs for health endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;
use trackline_domain::tracking::ReadinessSnapshot;
use utoipa::ToSchema;

/// Store readiness as seen by the last probe
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    /// Whether the last store probe succeeded
    #[schema(example = true)]
    pub ready: bool,
    /// When the last probe finished; absent before the first probe
    pub checked_at: Option<DateTime<Utc>>,
}

impl From<ReadinessSnapshot> for ReadinessResponse {
    fn from(snapshot: ReadinessSnapshot) -> Self {
        Self {
            ready: snapshot.ready,
            checked_at: snapshot.checked_at,
        }
    }
}
