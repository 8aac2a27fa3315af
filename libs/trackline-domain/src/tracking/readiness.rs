//! Store readiness state
//!
//! Adapters own a [`StoreReadiness`] and flip it from their health probe.
//! The service checks it before touching the store so callers get a clear
//! "store unavailable" error instead of an opaque driver failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Default)]
struct ReadinessInner {
    ready: AtomicBool,
    checked_at: Mutex<Option<DateTime<Utc>>>,
}

/// Shared readiness flag; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct StoreReadiness {
    inner: Arc<ReadinessInner>,
}

/// Point-in-time view of the readiness state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSnapshot {
    pub ready: bool,
    /// When the last probe finished, if one has run
    pub checked_at: Option<DateTime<Utc>>,
}

impl StoreReadiness {
    /// A flag that starts out not ready
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag that starts out ready (stores with nothing to connect to)
    pub fn ready() -> Self {
        let readiness = Self::new();
        readiness.mark_ready();
        readiness
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Acquire)
    }

    /// Record a successful probe. Returns true when the state changed.
    pub fn mark_ready(&self) -> bool {
        self.touch();
        !self.inner.ready.swap(true, Ordering::AcqRel)
    }

    /// Record a failed probe. Returns true when the state changed.
    pub fn mark_unavailable(&self) -> bool {
        self.touch();
        self.inner.ready.swap(false, Ordering::AcqRel)
    }

    pub fn snapshot(&self) -> ReadinessSnapshot {
        let checked_at = *self
            .inner
            .checked_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        ReadinessSnapshot {
            ready: self.is_ready(),
            checked_at,
        }
    }

    fn touch(&self) {
        let mut checked_at = self
            .inner
            .checked_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *checked_at = Some(Utc::now());
    }
}
