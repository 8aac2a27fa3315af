//! # Trackline Domain Layer
//!
//! This crate contains the business rules for the Trackline location service.
//! It follows hexagonal architecture principles:
//!
//! - **Entities**: Tracker reports and their identifiers
//! - **Ports**: Trait definitions for external dependencies (TrackerRepository)
//! - **Services**: Validation and orchestration of ingestion and lookup
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (MongoDB, HTTP, etc.).
//! The document store is expressed as a trait (port) implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use trackline_domain::memory::InMemoryTrackerRepository;
//! use trackline_domain::tracking::{RawReport, TrackerService};
//!
//! # async fn example() {
//! let service = TrackerService::with_repository(InMemoryTrackerRepository::new());
//! let raw: RawReport = serde_json::from_value(serde_json::json!({
//!     "deviceId": "dev-1",
//!     "latitude": 37.7,
//!     "longitude": -122.4,
//!     "timestamp": "2024-01-01T00:00:00Z"
//! }))
//! .unwrap();
//! let id = service.record_report(raw).await.unwrap();
//! println!("Stored report: {}", id);
//! # }
//! ```

pub mod memory;
pub mod ports;
pub mod tracking;

// Re-export commonly used types
pub use ports::TrackerRepository;
pub use tracking::{
    DeviceId, NewTrackerReport, RawReport, ReportId, StoreReadiness, TrackerReport,
    TrackerService, TrackingError,
};
