//! Store readiness probe
//!
//! Pings MongoDB and flips the repository's readiness flag. Transitions are
//! logged once; repeated failures while already unavailable stay at debug level.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};
use trackline_domain::ports::TrackerRepository;

use super::mongo_repository::MongoTrackerRepository;

/// Delay between attempts when no periodic interval is configured
const RETRY_UNTIL_READY: Duration = Duration::from_secs(1);

/// Ping once and record the outcome. Returns whether the store is ready.
async fn probe_once(repository: &MongoTrackerRepository) -> bool {
    let readiness = repository.readiness();
    let first_probe = readiness.snapshot().checked_at.is_none();

    match repository.ping().await {
        Ok(()) => {
            if readiness.mark_ready() {
                info!(database = %repository.database_name(), "MongoDB connected");
            }
            true
        }
        Err(err) => {
            if readiness.mark_unavailable() || first_probe {
                error!(error = %err, "MongoDB connection error");
            } else {
                debug!(error = %err, "MongoDB still unreachable");
            }
            false
        }
    }
}

/// Probe immediately, then every `every`
///
/// A zero interval disables periodic checks: the task retries every second
/// until the first successful ping, then ends. The task never ends the
/// process; while the store is unreachable requests fail with "store unavailable".
pub fn spawn_readiness_probe(
    repository: MongoTrackerRepository,
    every: Duration,
) -> JoinHandle<()> {
    spawn_probe(repository, every, RETRY_UNTIL_READY)
}

fn spawn_probe(
    repository: MongoTrackerRepository,
    every: Duration,
    retry: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if every.is_zero() {
            while !probe_once(&repository).await {
                sleep(retry).await;
            }
            return;
        }

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            probe_once(&repository).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MongoSettings;

    fn unreachable_settings() -> MongoSettings {
        MongoSettings {
            server_selection_timeout: Duration::from_millis(200),
            connect_timeout: Duration::from_millis(200),
            ..MongoSettings::new("mongodb://127.0.0.1:1/?directConnection=true")
        }
    }

    #[tokio::test]
    async fn test_probe_marks_unreachable_store_unavailable() {
        let repository = MongoTrackerRepository::connect(&unreachable_settings())
            .await
            .unwrap();

        let ready = probe_once(&repository).await;

        assert!(!ready);
        let snapshot = repository.readiness().snapshot();
        assert!(!snapshot.ready);
        assert!(snapshot.checked_at.is_some());
    }

    #[tokio::test]
    async fn test_zero_interval_keeps_retrying_until_ready() {
        let repository = MongoTrackerRepository::connect(&unreachable_settings())
            .await
            .unwrap();

        let handle = spawn_probe(repository.clone(), Duration::ZERO, Duration::from_millis(50));
        let first = repository.readiness().snapshot();
        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert!(!handle.is_finished());
        let later = repository.readiness().snapshot();
        assert!(!later.ready);
        assert!(later.checked_at.is_some());
        assert!(later.checked_at > first.checked_at);

        handle.abort();
    }
}
