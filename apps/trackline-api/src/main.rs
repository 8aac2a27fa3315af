//! Trackline API - Tracker Report Service
//!
//! HTTP service accepting location reports from IoT trackers and serving
//! them back by device identifier. Reports are stored in MongoDB.

mod config;
mod dto;
mod handlers;
mod routes;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trackline_domain::tracking::{TrackerService, TrackingConfig};
use trackline_mongo::{spawn_readiness_probe, MongoTrackerRepository};

use crate::config::AppConfig;

/// Application state shared across handlers
///
/// Generic over the repository so tests can substitute an in-memory store.
pub struct AppState<R> {
    pub tracker_service: Arc<TrackerService<R>>,
}

impl<R> AppState<R> {
    pub fn new(service: TrackerService<R>) -> Self {
        Self {
            tracker_service: Arc::new(service),
        }
    }
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            tracker_service: Arc::clone(&self.tracker_service),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting Trackline API");

    let config = AppConfig::from_env();

    info!(
        validation = %config.validation,
        probe_interval_secs = config.probe_interval.as_secs(),
        "Configuration loaded"
    );

    // The driver connects lazily; readiness is decided by the probe
    let repository = MongoTrackerRepository::connect(&config.mongo).await?;
    let probe = spawn_readiness_probe(repository.clone(), config.probe_interval);

    let service = TrackerService::new(
        repository,
        TrackingConfig {
            validation: config.validation,
        },
    );
    let app = routes::create_router(AppState::new(service));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(addr = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    probe.abort();
    info!("Trackline API stopped");

    Ok(())
}

/// `RUST_LOG` filters (default `info`); `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(_) => {
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }

    info!("Shutdown signal received");
}
